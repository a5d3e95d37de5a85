use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Characters kept literal in the canonical resource: the host-allowed set.
///
/// Everything else is escaped, notably `/`, `%`, `?`, `#`, `@`, space
/// and any non-ASCII byte.
const CANONICAL_KEY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'[')
    .remove(b']')
    .remove(b'_')
    .remove(b'~');

/// ResourceObject identifies one object inside a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceObject {
    bucket: String,
    object_key: String,
}

impl ResourceObject {
    /// Create a new resource object.
    pub fn new(bucket: impl Into<String>, object_key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            object_key: object_key.into(),
        }
    }

    /// Bucket of this object.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Key of this object, as given by the caller.
    pub fn object_key(&self) -> &str {
        &self.object_key
    }

    /// The canonical resource that gets signed: `/<bucket>/<escaped key>`.
    ///
    /// Path separators inside the key are escaped too, `foo/bar.zip` in
    /// bucket `foo` becomes `/foo/foo%2Fbar.zip`.
    pub fn canonical_path(&self) -> String {
        format!(
            "/{}/{}",
            self.bucket,
            utf8_percent_encode(&self.object_key, CANONICAL_KEY_SET)
        )
    }

    /// The raw key appended to the request url.
    ///
    /// No encoding happens here, the uri builder escapes it for the path.
    pub fn request_uri(&self) -> &str {
        &self.object_key
    }
}
