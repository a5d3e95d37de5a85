use std::collections::HashMap;

use anyhow::Result;
use nossign_core::time::parse_date;
use nossign_core::StaticEnv;
use nossign_nos::{Config, Operation, RequestAuthorizer};
use pretty_assertions::assert_eq;

fn load_config(sub_domain: bool) -> Config {
    let env = StaticEnv::new([
        ("NOS_ACCESS_KEY", "access_key"),
        ("NOS_ACCESS_SECRET", "123123"),
        ("NOS_ENDPOINT", "https://nos-eastchina1.126.net"),
        ("NOS_DEFAULT_BUCKET", "foo"),
    ]);

    Config::new().with_sub_domain(sub_domain).from_env(&env)
}

fn headers(req: &nossign_nos::AuthorizedRequest) -> HashMap<String, String> {
    req.headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                v.to_str().expect("must be valid header").to_string(),
            )
        })
        .collect()
}

#[test]
fn test_authorize_is_deterministic() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let time = parse_date("Wed, 28 Jul 2021 08:38:54").expect("date must be valid");
    let authorizer = RequestAuthorizer::new(load_config(false))?.with_time(time);

    let first = authorizer.authorize(Operation::Put, "hello.text", Some(11))?;
    let second = authorizer.authorize(Operation::Put, "hello.text", Some(11))?;

    assert_eq!(first.url, second.url);
    assert_eq!(headers(&first), headers(&second));
    assert_eq!(
        headers(&first),
        HashMap::from([
            ("date".to_string(), "Wed, 28 Jul 2021 08:38:54 GMT".to_string()),
            ("content-length".to_string(), "11".to_string()),
            (
                "authorization".to_string(),
                "NOS access_key:liKwgqkyMoNyxx+kVjm8GafE+5QUpSQHQzT7J9n7q8M=".to_string()
            ),
            ("host".to_string(), "foo.nos-eastchina1.126.net".to_string()),
        ])
    );
    Ok(())
}

#[test]
fn test_host_header_by_addressing_mode() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let path_style = RequestAuthorizer::new(load_config(false))?;
    let req = path_style.authorize(Operation::Delete, "hello.text", None)?;
    assert_eq!(req.url.host(), Some("nos-eastchina1.126.net"));
    assert_eq!(req.url.path(), "/foo/hello.text");
    assert_eq!(req.headers["host"], "foo.nos-eastchina1.126.net");

    let sub_domain = RequestAuthorizer::new(load_config(true))?;
    let req = sub_domain.authorize(Operation::Delete, "hello.text", None)?;
    assert_eq!(req.url.host(), Some("foo.nos-eastchina1.126.net"));
    assert_eq!(req.url.path(), "/hello.text");
    assert_eq!(
        req.headers["host"].to_str()?,
        req.url.host().unwrap_or_default()
    );
    Ok(())
}

#[test]
fn test_authorizer_is_shareable() -> Result<()> {
    let time = parse_date("Wed, 28 Jul 2021 08:38:54").expect("date must be valid");
    let authorizer = RequestAuthorizer::new(load_config(false))?.with_time(time);

    let signatures = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    authorizer
                        .authorize(Operation::Put, "hello.text", Some(11))
                        .map(|req| req.headers["authorization"].clone())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("thread must not panic"))
            .collect::<nossign_core::Result<Vec<_>>>()
    })?;

    assert!(signatures.windows(2).all(|w| w[0] == w[1]));
    Ok(())
}
