//! NOS signature.

use std::fmt::Write;

use http::Method;
use log::debug;
use nossign_core::hash::base64_hmac_sha256;
use nossign_core::hash::hex_md5;
use nossign_core::time::format_date;
use nossign_core::time::now;
use nossign_core::Result;

use crate::constants::*;
use crate::header::normalize;
use crate::header::HeaderInput;
use crate::header::HeaderSet;
use crate::resource::ResourceObject;

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// CanonicalizedResource;
/// ```
///
/// `headers` must be normalized already. Missing `content-md5` and
/// `content-type` are signed as empty lines, a missing `date` is filled with
/// the current time.
pub fn string_to_sign(
    method: &Method,
    headers: &HeaderSet,
    resource: &ResourceObject,
) -> Result<String> {
    let header = |k: &str| headers.get(k).map(String::as_str).unwrap_or_default();

    let date = match headers.get(DATE) {
        Some(v) => v.clone(),
        None => format_date(now()),
    };

    let mut s = String::new();
    writeln!(&mut s, "{}", method.as_str().to_uppercase())?;
    writeln!(&mut s, "{}", header(CONTENT_MD5))?;
    writeln!(&mut s, "{}", header(CONTENT_TYPE))?;
    writeln!(&mut s, "{date}")?;
    write!(&mut s, "{}", resource.canonical_path().trim())?;

    debug!("string to sign: {}", &s);
    Ok(s)
}

/// Sign the string with the secret key.
///
/// Returns the base64 encoded HMAC-SHA256 digest.
pub fn sign(secret_key: &str, string_to_sign: &str) -> String {
    base64_hmac_sha256(secret_key.as_bytes(), string_to_sign.as_bytes())
}

/// Hex encoded MD5 of the content, the value NOS expects in `Content-MD5`.
pub fn content_hash(data: impl AsRef<[u8]>) -> String {
    hex_md5(data.as_ref())
}

/// Calculate the signature of a request described by raw headers.
///
/// Headers are normalized first, so names may use any case and `date` may
/// be given as a timestamp.
pub fn signature<K, V>(
    secret_key: &str,
    method: &Method,
    headers: impl IntoIterator<Item = (K, V)>,
    resource: &ResourceObject,
) -> Result<String>
where
    K: AsRef<str>,
    V: Into<HeaderInput>,
{
    let headers = normalize(headers);
    let string_to_sign = string_to_sign(method, &headers, resource)?;

    Ok(sign(secret_key, &string_to_sign))
}
