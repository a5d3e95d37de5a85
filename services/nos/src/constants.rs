// Headers used in NOS signing.
pub const CONTENT_MD5: &str = "content-md5";
pub const CONTENT_TYPE: &str = "content-type";
pub const CONTENT_LENGTH: &str = "content-length";
pub const DATE: &str = "date";

// Scheme token of the authorization header: "NOS <access_key>:<signature>".
pub const AUTHORIZATION_SCHEME: &str = "NOS";

// Env values used in NOS services.
pub const NOS_ACCESS_KEY: &str = "NOS_ACCESS_KEY";
pub const NOS_ACCESS_SECRET: &str = "NOS_ACCESS_SECRET";
pub const NOS_ENDPOINT: &str = "NOS_ENDPOINT";
pub const NOS_DEFAULT_BUCKET: &str = "NOS_DEFAULT_BUCKET";
pub const NOS_CDN_DOMAIN: &str = "NOS_CDN_DOMAIN";
pub const NOS_SUB_DOMAIN: &str = "NOS_SUB_DOMAIN";
