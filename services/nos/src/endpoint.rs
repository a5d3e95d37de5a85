//! Url and `Host` resolution for path-style and virtual-host addressing.

use std::net::IpAddr;

use http::Uri;
use log::debug;
use nossign_core::{Error, Result};
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

use crate::config::Config;
use crate::resource::ResourceObject;

/// Characters kept literal when the object key is placed in the uri path.
///
/// `/` stays a separator here, unlike the canonical resource.
const URI_PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// EndpointResolver computes where a request goes and which `Host` it
/// carries.
///
/// - Path-style: `<cdn_domain or endpoint>/<bucket>/<key>`, while `Host` is
///   still `<bucket>.<endpoint host>`. NOS routes by the virtual-host style
///   `Host` header even when the request path names the bucket.
/// - Virtual-host: `<scheme>://<bucket>.<endpoint host>/<key>`, `Host` is the
///   host of that url. `cdn_domain` is not used.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    bucket: String,
    endpoint: Uri,
    cdn_domain: Option<Uri>,
    is_sub_domain: bool,
}

impl EndpointResolver {
    /// Build a resolver from config.
    ///
    /// Fails with a config error if `endpoint` or `cdn_domain` is not an
    /// absolute url, or if subdomain addressing is asked for an ip endpoint.
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = parse_base_url("endpoint", &config.endpoint)?;
        if config.is_sub_domain && is_ip_host(&endpoint) {
            return Err(Error::config_invalid(format!(
                "endpoint {:?} is an ip address, bucket can't be addressed as subdomain",
                config.endpoint
            )));
        }
        let cdn_domain = config
            .cdn_domain
            .as_deref()
            .map(|v| parse_base_url("cdn_domain", v))
            .transpose()?;

        Ok(Self {
            bucket: config.default_bucket.clone(),
            endpoint,
            cdn_domain,
            is_sub_domain: config.is_sub_domain,
        })
    }

    /// Returns true if buckets are addressed as subdomains.
    pub fn is_sub_domain(&self) -> bool {
        self.is_sub_domain
    }

    /// The url objects are appended to, without a trailing slash.
    pub fn base_url(&self) -> String {
        if self.is_sub_domain {
            let scheme = self.endpoint.scheme_str().unwrap_or("http");
            let host = self.endpoint.host().unwrap_or_default();
            match self.endpoint.port_u16() {
                Some(port) => format!("{scheme}://{}.{host}:{port}", self.bucket),
                None => format!("{scheme}://{}.{host}", self.bucket),
            }
        } else {
            let base = self.cdn_domain.as_ref().unwrap_or(&self.endpoint);
            format!("{}/{}", url_without_trailing_slash(base), self.bucket)
        }
    }

    /// The url of the object, with the key escaped for the uri path.
    pub fn object_url(&self, resource: &ResourceObject) -> Result<Uri> {
        let url = format!(
            "{}/{}",
            self.base_url(),
            utf8_percent_encode(resource.request_uri(), URI_PATH_SET)
        );
        debug!("resolved object url: {url}");

        url.parse::<Uri>().map_err(|e| {
            Error::request_invalid(format!("object url {url} is invalid")).with_source(e)
        })
    }

    /// The `Host` header sent along with `url`.
    pub fn host_header(&self, url: &Uri) -> Result<String> {
        if self.is_sub_domain {
            url.host()
                .map(str::to_string)
                .ok_or_else(|| Error::request_invalid(format!("url {url} has no host")))
        } else {
            let host = self.endpoint.host().unwrap_or_default();
            Ok(format!("{}.{host}", self.bucket))
        }
    }
}

fn parse_base_url(name: &str, value: &str) -> Result<Uri> {
    let uri = value.trim().parse::<Uri>().map_err(|e| {
        Error::config_invalid(format!("{name} {value:?} is not a valid url")).with_source(e)
    })?;

    match (uri.scheme_str(), uri.host()) {
        (Some(_), Some(host)) if !host.is_empty() => Ok(uri),
        _ => Err(Error::config_invalid(format!(
            "{name} {value:?} must be an absolute url with scheme and host"
        ))),
    }
}

fn is_ip_host(uri: &Uri) -> bool {
    uri.host()
        .map(|h| h.trim_start_matches('[').trim_end_matches(']'))
        .is_some_and(|h| h.parse::<IpAddr>().is_ok())
}

fn url_without_trailing_slash(uri: &Uri) -> String {
    let scheme = uri.scheme_str().unwrap_or("http");
    let authority = uri.authority().map(|v| v.as_str()).unwrap_or_default();
    let path = uri.path().trim_end_matches('/');

    format!("{scheme}://{authority}{path}")
}
