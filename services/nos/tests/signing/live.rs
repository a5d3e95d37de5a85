use std::env;

use anyhow::Result;
use http::StatusCode;
use log::{debug, warn};
use nossign_core::OsEnv;
use nossign_nos::{content_hash, AuthorizeOptions, Config, Operation, RequestAuthorizer};
use reqwest::Client;

/// Initialize test environment
///
/// Reads `NOS_ACCESS_KEY`, `NOS_ACCESS_SECRET`, `NOS_ENDPOINT` and
/// `NOS_DEFAULT_BUCKET`, optionally from a `.env` file.
fn init_live_test() -> Option<RequestAuthorizer> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("NOS_TEST").is_err() || env::var("NOS_TEST").unwrap() != "on" {
        return None;
    }

    let config = Config::new().from_env(&OsEnv);
    Some(RequestAuthorizer::new(config).expect("NOS_* env must be a valid config"))
}

async fn send(req: nossign_nos::AuthorizedRequest, body: Vec<u8>) -> Result<(StatusCode, String)> {
    let resp = Client::new()
        .request(req.method, req.url.to_string())
        .headers(req.headers)
        .body(body)
        .send()
        .await?;

    let status = resp.status();
    let text = resp.text().await?;
    debug!("got response: {status} {text}");
    Ok((status, text))
}

#[tokio::test]
async fn test_put_then_delete_object() -> Result<()> {
    let Some(authorizer) = init_live_test() else {
        warn!("NOS_TEST is not set, skipped");
        return Ok(());
    };

    let body = b"hello world".to_vec();
    let req = authorizer.authorize(Operation::Put, "hello.text", Some(body.len() as u64))?;
    let (status, text) = send(req, body).await?;
    assert_eq!(StatusCode::OK, status, "put failed: {text}");

    let req = authorizer.authorize(Operation::Delete, "hello.text", None)?;
    let (status, text) = send(req, Vec::new()).await?;
    assert_eq!(StatusCode::OK, status, "delete failed: {text}");
    Ok(())
}

#[tokio::test]
async fn test_put_object_with_content_md5() -> Result<()> {
    let Some(authorizer) = init_live_test() else {
        warn!("NOS_TEST is not set, skipped");
        return Ok(());
    };

    let body = b"hello nos".to_vec();
    let opts = AuthorizeOptions::new()
        .with_content_length(body.len() as u64)
        .with_content_md5(content_hash(&body))
        .with_content_type("text/plain");
    let req = authorizer.authorize_with(Operation::Put, "dir/hello md5.txt", opts)?;
    let (status, text) = send(req, body).await?;
    assert_eq!(StatusCode::OK, status, "put failed: {text}");

    let req = authorizer.authorize(Operation::Delete, "dir/hello md5.txt", None)?;
    let (status, text) = send(req, Vec::new()).await?;
    assert_eq!(StatusCode::OK, status, "delete failed: {text}");
    Ok(())
}
