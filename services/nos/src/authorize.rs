//! Request authorization for NOS object operations.

use std::fmt::{Debug, Formatter};

use http::header::HeaderName;
use http::header::AUTHORIZATION;
use http::header::HOST;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;
use log::{debug, warn};
use nossign_core::time::{format_date, now, DateTime};
use nossign_core::utils::Redact;
use nossign_core::Result;

use crate::config::Config;
use crate::constants::*;
use crate::endpoint::EndpointResolver;
use crate::header::{normalize, HeaderSet};
use crate::resource::ResourceObject;
use crate::sign::{sign, string_to_sign};

/// Object operations that can be authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Upload an object.
    Put,
    /// Delete an object.
    Delete,
}

impl Operation {
    /// HTTP method of this operation.
    pub fn method(&self) -> Method {
        match self {
            Operation::Put => Method::PUT,
            Operation::Delete => Method::DELETE,
        }
    }
}

/// Optional inputs of [`RequestAuthorizer::authorize_with`].
///
/// All of them describe the request body, so they only apply to
/// [`Operation::Put`].
#[derive(Debug, Clone, Default)]
pub struct AuthorizeOptions {
    content_length: Option<u64>,
    content_md5: Option<String>,
    content_type: Option<String>,
}

impl AuthorizeOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body length, sent as `content-length`.
    pub fn with_content_length(mut self, length: u64) -> Self {
        self.content_length = Some(length);
        self
    }

    /// Set the body digest, sent and signed as `content-md5`.
    ///
    /// Use [`content_hash`](crate::content_hash) to compute it.
    pub fn with_content_md5(mut self, md5: impl Into<String>) -> Self {
        self.content_md5 = Some(md5.into());
        self
    }

    /// Set the body type, sent and signed as `content-type`.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A request ready to be handed to an http transport.
#[derive(Debug, Clone)]
pub struct AuthorizedRequest {
    /// HTTP method.
    pub method: Method,
    /// Target url.
    pub url: Uri,
    /// Headers to send, exactly as signed.
    pub headers: HeaderMap,
}

impl AuthorizedRequest {
    /// Apply method, url and headers onto request parts.
    ///
    /// Existing headers with the same names are replaced, others are kept.
    pub fn apply(self, parts: &mut http::request::Parts) {
        parts.method = self.method;
        parts.uri = self.url;

        for (name, value) in self.headers.iter() {
            parts.headers.insert(name.clone(), value.clone());
        }
    }

    /// Build an `http::Request` carrying `body`.
    pub fn into_request<T>(self, body: T) -> http::Request<T> {
        let (mut parts, body) = http::Request::new(body).into_parts();
        self.apply(&mut parts);

        http::Request::from_parts(parts, body)
    }
}

/// RequestAuthorizer that implements NOS header authorization.
///
/// ```text
/// authorization: NOS <access_key>:base64(hmac-sha256(secret, string_to_sign))
/// ```
pub struct RequestAuthorizer {
    access_key: String,
    access_secret: String,
    bucket: String,
    endpoint: EndpointResolver,
    time: Option<DateTime>,
}

impl Debug for RequestAuthorizer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAuthorizer")
            .field("access_key", &Redact::from(&self.access_key))
            .field("access_secret", &Redact::from(&self.access_secret))
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("time", &self.time)
            .finish()
    }
}

impl RequestAuthorizer {
    /// Create an authorizer from config.
    ///
    /// Fails if a required field is missing or an url is malformed.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let endpoint = EndpointResolver::new(&config)?;

        Ok(Self {
            access_key: config.access_key,
            access_secret: config.access_secret,
            bucket: config.default_bucket,
            endpoint,
            time: None,
        })
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    /// Public url of an object in the default bucket.
    pub fn resource_url(&self, object_key: &str) -> Result<Uri> {
        self.endpoint
            .object_url(&ResourceObject::new(&self.bucket, object_key))
    }

    /// Authorize an operation on `object_key` in the default bucket.
    ///
    /// `content_length` is only sent for [`Operation::Put`].
    pub fn authorize(
        &self,
        operation: Operation,
        object_key: &str,
        content_length: Option<u64>,
    ) -> Result<AuthorizedRequest> {
        let mut opts = AuthorizeOptions::new();
        opts.content_length = content_length;

        self.authorize_with(operation, object_key, opts)
    }

    /// Authorize an operation with body related headers.
    pub fn authorize_with(
        &self,
        operation: Operation,
        object_key: &str,
        opts: AuthorizeOptions,
    ) -> Result<AuthorizedRequest> {
        let method = operation.method();
        let resource = ResourceObject::new(&self.bucket, object_key);

        let mut seed: Vec<(&str, String)> = vec![(DATE, format_date(self.get_time()))];
        match operation {
            Operation::Put => {
                if let Some(length) = opts.content_length {
                    seed.push((CONTENT_LENGTH, length.to_string()));
                }
                if let Some(md5) = opts.content_md5 {
                    seed.push((CONTENT_MD5, md5));
                }
                if let Some(content_type) = opts.content_type {
                    seed.push((CONTENT_TYPE, content_type));
                }
            }
            Operation::Delete => {
                if opts.content_length.is_some()
                    || opts.content_md5.is_some()
                    || opts.content_type.is_some()
                {
                    warn!("body headers are ignored for {method} {object_key}");
                }
            }
        }
        let signed = normalize(seed);

        let string_to_sign = string_to_sign(&method, &signed, &resource)?;
        let signature = sign(&self.access_secret, &string_to_sign);

        let url = self.endpoint.object_url(&resource)?;
        let host = self.endpoint.host_header(&url)?;

        let mut headers = to_header_map(signed)?;
        headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue =
                format!("{AUTHORIZATION_SCHEME} {}:{signature}", self.access_key).parse()?;
            value.set_sensitive(true);

            value
        });
        headers.insert(HOST, host.parse()?);

        debug!("authorized {method} {url}");
        Ok(AuthorizedRequest {
            method,
            url,
            headers,
        })
    }
}

fn to_header_map(headers: HeaderSet) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len() + 2);
    for (k, v) in headers {
        map.insert(HeaderName::from_bytes(k.as_bytes())?, v.parse()?);
    }

    Ok(map)
}
