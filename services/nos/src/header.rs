//! Header normalization before signing.

use std::collections::BTreeMap;

use nossign_core::time::format_date;
use nossign_core::time::DateTime;

/// HeaderSet maps lower-case header names to their string values.
pub type HeaderSet = BTreeMap<String, String>;

/// A header value as supplied by the caller.
///
/// Timestamps are kept typed until [`normalize`] renders them in the signed
/// date format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderInput {
    /// A value used as is.
    Text(String),
    /// A point in time, rendered with [`format_date`].
    Timestamp(DateTime),
}

impl HeaderInput {
    /// Resolve this value into the string that is sent and signed.
    pub fn resolve(self) -> String {
        match self {
            HeaderInput::Text(v) => v,
            HeaderInput::Timestamp(t) => format_date(t),
        }
    }
}

impl From<String> for HeaderInput {
    fn from(v: String) -> Self {
        HeaderInput::Text(v)
    }
}

impl From<&String> for HeaderInput {
    fn from(v: &String) -> Self {
        HeaderInput::Text(v.clone())
    }
}

impl From<&str> for HeaderInput {
    fn from(v: &str) -> Self {
        HeaderInput::Text(v.to_string())
    }
}

impl From<u64> for HeaderInput {
    fn from(v: u64) -> Self {
        HeaderInput::Text(v.to_string())
    }
}

impl From<DateTime> for HeaderInput {
    fn from(v: DateTime) -> Self {
        HeaderInput::Timestamp(v)
    }
}

/// Normalize headers for signing.
///
/// - Every name is lower-cased. Names that only differ in case fold into
///   one entry, the last one in iteration order wins.
/// - Text values are kept unchanged, timestamps are formatted.
/// - No header is added or dropped: a missing `date` stays missing.
pub fn normalize<K, V>(headers: impl IntoIterator<Item = (K, V)>) -> HeaderSet
where
    K: AsRef<str>,
    V: Into<HeaderInput>,
{
    headers
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_lowercase(), v.into().resolve()))
        .collect()
}
