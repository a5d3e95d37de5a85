use std::fmt::{Debug, Formatter};

use log::warn;
use nossign_core::utils::Redact;
use nossign_core::{Env, Error, Result};
use serde::Deserialize;

use crate::constants::*;

/// Config carries all the configuration for NOS services.
///
/// A config is built once and handed to
/// [`RequestAuthorizer::new`](crate::RequestAuthorizer::new), which owns it
/// from then on. Several configs (buckets, credentials) may live in one
/// process.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `access_key` will be loaded from
    ///
    /// - this field if it's not empty
    /// - env value: [`NOS_ACCESS_KEY`]
    pub access_key: String,
    /// `access_secret` will be loaded from
    ///
    /// - this field if it's not empty
    /// - env value: [`NOS_ACCESS_SECRET`]
    pub access_secret: String,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's not empty
    /// - env value: [`NOS_ENDPOINT`]
    ///
    /// Must be an absolute url like `https://nos-eastchina1.126.net`.
    pub endpoint: String,
    /// `default_bucket` will be loaded from
    ///
    /// - this field if it's not empty
    /// - env value: [`NOS_DEFAULT_BUCKET`]
    pub default_bucket: String,
    /// `cdn_domain` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NOS_CDN_DOMAIN`]
    ///
    /// Only used by path-style addressing.
    pub cdn_domain: Option<String>,
    /// Address the bucket as a subdomain of the endpoint host.
    ///
    /// env value [`NOS_SUB_DOMAIN`] can only turn this on.
    pub is_sub_domain: bool,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = access_key.into();
        self
    }

    /// Set access_secret
    pub fn with_access_secret(mut self, access_secret: impl Into<String>) -> Self {
        self.access_secret = access_secret.into();
        self
    }

    /// Set endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set default_bucket
    pub fn with_default_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.default_bucket = bucket.into();
        self
    }

    /// Set cdn_domain
    pub fn with_cdn_domain(mut self, cdn_domain: impl Into<String>) -> Self {
        self.cdn_domain = Some(cdn_domain.into());
        self
    }

    /// Set is_sub_domain
    pub fn with_sub_domain(mut self, is_sub_domain: bool) -> Self {
        self.is_sub_domain = is_sub_domain;
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        let fill = |field: &mut String, key: &str| {
            if field.is_empty() {
                if let Some(v) = env.var(key) {
                    *field = v;
                }
            }
        };

        fill(&mut self.access_key, NOS_ACCESS_KEY);
        fill(&mut self.access_secret, NOS_ACCESS_SECRET);
        fill(&mut self.endpoint, NOS_ENDPOINT);
        fill(&mut self.default_bucket, NOS_DEFAULT_BUCKET);

        if self.cdn_domain.is_none() {
            self.cdn_domain = env.var(NOS_CDN_DOMAIN).filter(|v| !v.is_empty());
        }
        if !self.is_sub_domain {
            self.is_sub_domain = env.var(NOS_SUB_DOMAIN).is_some_and(|v| parse_switch(&v));
        }

        self
    }

    /// Check that every required field is present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("access_key", &self.access_key),
            ("access_secret", &self.access_secret),
            ("endpoint", &self.endpoint),
            ("default_bucket", &self.default_bucket),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::config_invalid(format!("{name} is required")));
            }
        }

        Ok(())
    }
}

fn parse_switch(v: &str) -> bool {
    match v.trim().to_lowercase().as_str() {
        "true" | "on" | "1" => true,
        "false" | "off" | "0" | "" => false,
        _ => {
            warn!("unrecognized {NOS_SUB_DOMAIN} value {v:?}, treated as false");
            false
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &Redact::from(&self.access_key))
            .field("access_secret", &Redact::from(&self.access_secret))
            .field("endpoint", &self.endpoint)
            .field("default_bucket", &self.default_bucket)
            .field("cdn_domain", &self.cdn_domain)
            .field("is_sub_domain", &self.is_sub_domain)
            .finish()
    }
}
