//! NOS (NetEase Object Storage) signing for nossign.
//!
//! Given an operation, an object key and the credentials in [`Config`], a
//! [`RequestAuthorizer`] produces the url and the exact header set the
//! service accepts. Sending the request is left to the caller.
//!
//! ## Example
//!
//! ```no_run
//! use nossign_core::Result;
//! use nossign_nos::{Config, Operation, RequestAuthorizer};
//!
//! fn main() -> Result<()> {
//!     let config = Config::new()
//!         .with_access_key("access_key")
//!         .with_access_secret("access_secret")
//!         .with_endpoint("https://nos-eastchina1.126.net")
//!         .with_default_bucket("bucket");
//!     let authorizer = RequestAuthorizer::new(config)?;
//!
//!     let body = b"hello world";
//!     let req = authorizer.authorize(Operation::Put, "hello.text", Some(body.len() as u64))?;
//!
//!     // Hand method, url and headers to any http client.
//!     println!("{} {}", req.method, req.url);
//!     for (name, value) in &req.headers {
//!         println!("{name}: {value:?}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Signature
//!
//! ```text
//! authorization: NOS <access_key>:base64(hmac-sha256(access_secret, string_to_sign))
//!
//! string_to_sign = METHOD + "\n" +
//!                  Content-MD5 + "\n" +
//!                  Content-Type + "\n" +
//!                  Date + "\n" +
//!                  "/" + bucket + "/" + escaped(object_key)
//! ```

#![warn(missing_docs)]

mod constants;

mod config;
pub use config::Config;

mod resource;
pub use resource::ResourceObject;

mod header;
pub use header::{normalize, HeaderInput, HeaderSet};

mod sign;
pub use sign::{content_hash, sign, signature, string_to_sign};

mod endpoint;
pub use endpoint::EndpointResolver;

mod authorize;
pub use authorize::{AuthorizeOptions, AuthorizedRequest, Operation, RequestAuthorizer};
