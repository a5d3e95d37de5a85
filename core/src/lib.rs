//! Core components for signing NOS requests.
//!
//! This crate provides the building blocks shared by the nossign service
//! crates: the error type, hashing helpers, the GMT date codec and the
//! environment abstraction used to load configuration.
//!
//! ## Example
//!
//! ```
//! use nossign_core::hash::{base64_hmac_sha256, hex_md5};
//! use nossign_core::time::{format_date, parse_date};
//!
//! let date = parse_date("Wed, 28 Jul 2021 08:38:54").unwrap();
//! assert_eq!(format_date(date), "Wed, 28 Jul 2021 08:38:54 GMT");
//!
//! assert_eq!(hex_md5(b"12345"), "827ccb0eea8a706c4c34a16891f84e7b");
//! let _signature = base64_hmac_sha256(b"secret", b"string to sign");
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Date formatting and parsing in the service's GMT format
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod env;
pub use env::{Env, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};
