//! Environment-driven configuration.
//!
//! Loaded once at startup from the process environment (with `.env` support
//! via dotenvy) and treated as immutable afterwards.

use anyhow::{anyhow, Context};
use std::env;

/// Runtime configuration for authentication, the R2 bucket, and the public
/// CDN host.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base32 shared secret for the one-time-password gate.
    pub totp_secret: String,
    /// Cloudflare account id, used to derive the R2 endpoint.
    pub r2_account_id: String,
    pub r2_access_key_id: String,
    pub r2_secret_access_key: String,
    pub r2_bucket_name: String,
    /// Public base URL the bucket is served from, stored without a
    /// trailing slash.
    pub cdn_base_url: String,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if
    /// one is present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let require = |name: &str| -> anyhow::Result<String> {
            let value = lookup(name)
                .ok_or_else(|| anyhow!("missing environment variable {name}"))?
                .trim()
                .to_string();
            if value.is_empty() {
                return Err(anyhow!("environment variable {name} is empty"));
            }
            Ok(value)
        };

        let config = Config {
            totp_secret: require("TOTP_SECRET_KEY")?,
            r2_account_id: require("R2_ACCOUNT_ID")?,
            r2_access_key_id: require("R2_ACCESS_KEY_ID")?,
            r2_secret_access_key: require("R2_SECRET_ACCESS_KEY")?,
            r2_bucket_name: require("R2_BUCKET_NAME")?,
            cdn_base_url: require("CDN_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !self.cdn_base_url.starts_with("http://") && !self.cdn_base_url.starts_with("https://") {
            return Err(anyhow!(
                "CDN_BASE_URL must start with http:// or https://, got {:?}",
                self.cdn_base_url
            ))
            .context("invalid configuration");
        }
        Ok(())
    }

    /// S3-compatible endpoint for the configured Cloudflare account.
    pub fn endpoint_url(&self) -> String {
        format!("https://{}.r2.cloudflarestorage.com", self.r2_account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("TOTP_SECRET_KEY", "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ"),
            ("R2_ACCOUNT_ID", "abc123"),
            ("R2_ACCESS_KEY_ID", "key-id"),
            ("R2_SECRET_ACCESS_KEY", "key-secret"),
            ("R2_BUCKET_NAME", "media"),
            ("CDN_BASE_URL", "https://cdn.example.com"),
        ])
    }

    fn load(env: &HashMap<&str, &str>) -> anyhow::Result<Config> {
        Config::from_lookup(|name| env.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_loads_complete_environment() {
        let config = load(&full_env()).unwrap();
        assert_eq!(config.r2_bucket_name, "media");
        assert_eq!(config.cdn_base_url, "https://cdn.example.com");
        assert_eq!(config.endpoint_url(), "https://abc123.r2.cloudflarestorage.com");
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let mut env = full_env();
        env.remove("R2_BUCKET_NAME");
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("R2_BUCKET_NAME"));
    }

    #[test]
    fn test_blank_variable_is_an_error() {
        let mut env = full_env();
        env.insert("R2_ACCESS_KEY_ID", "   ");
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_cdn_base_url_trailing_slash_is_trimmed() {
        let mut env = full_env();
        env.insert("CDN_BASE_URL", "https://cdn.example.com/");
        let config = load(&env).unwrap();
        assert_eq!(config.cdn_base_url, "https://cdn.example.com");
    }

    #[test]
    fn test_cdn_base_url_requires_scheme() {
        let mut env = full_env();
        env.insert("CDN_BASE_URL", "cdn.example.com");
        assert!(load(&env).is_err());
    }
}
