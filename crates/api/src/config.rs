//! Process configuration, read from the environment at startup.

use std::net::SocketAddr;

use anyhow::{Context as _, anyhow};

use storefront_auth::{DEFAULT_COST, SigningSecret};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Bootstrap admin account created on an empty user store.
#[derive(Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for SeedAdmin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeedAdmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: SigningSecret,
    pub cookie_secure: bool,
    pub bcrypt_cost: u32,
    pub seed_admin: Option<SeedAdmin>,
}

impl ApiConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(anyhow::Error::new(e).context("failed to load .env"));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("PORT is not a port number: '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        let secret = get("JWT_SECRET").ok_or_else(|| anyhow!("JWT_SECRET must be set"))?;
        let jwt_secret = SigningSecret::new(secret).context("JWT_SECRET rejected")?;

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).with_context(|| format!("COOKIE_SECURE is not a boolean: '{raw}'"))?,
            None => false,
        };

        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(raw) => raw.parse().with_context(|| format!("BCRYPT_COST is not a number: '{raw}'"))?,
            None => DEFAULT_COST,
        };

        let seed_admin = match (get("SEED_ADMIN_EMAIL"), lookup("SEED_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) if !password.is_empty() => Some(SeedAdmin { email, password }),
            (None, None) => None,
            _ => return Err(anyhow!("SEED_ADMIN_EMAIL and SEED_ADMIN_PASSWORD must be set together")),
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            cookie_secure,
            bcrypt_cost,
            seed_admin,
        })
    }

    pub fn bind_address(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const SECRET: &str = "config-test-secret-at-least-32-bytes";

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let cfg = config(&[("JWT_SECRET", SECRET)]).unwrap();

        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert!(!cfg.cookie_secure);
        assert_eq!(cfg.bcrypt_cost, DEFAULT_COST);
        assert!(cfg.seed_admin.is_none());
        assert_eq!(cfg.bind_address().unwrap().port(), 8080);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = config(&[]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn short_secret_is_an_error() {
        assert!(config(&[("JWT_SECRET", "short")]).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            ("JWT_SECRET", SECRET),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("COOKIE_SECURE", "true"),
            ("BCRYPT_COST", "4"),
            ("SEED_ADMIN_EMAIL", "root@shop.test"),
            ("SEED_ADMIN_PASSWORD", "hunter2"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_address().unwrap().to_string(), "127.0.0.1:9000");
        assert!(cfg.cookie_secure);
        assert_eq!(cfg.bcrypt_cost, 4);
        assert_eq!(cfg.seed_admin.as_ref().unwrap().email, "root@shop.test");
    }

    #[test]
    fn garbage_values_are_rejected() {
        assert!(config(&[("JWT_SECRET", SECRET), ("PORT", "eighty")]).is_err());
        assert!(config(&[("JWT_SECRET", SECRET), ("COOKIE_SECURE", "maybe")]).is_err());
    }

    #[test]
    fn half_configured_seed_admin_is_rejected() {
        assert!(config(&[("JWT_SECRET", SECRET), ("SEED_ADMIN_EMAIL", "root@shop.test")]).is_err());
    }

    #[test]
    fn seed_password_never_appears_in_debug_output() {
        let cfg = config(&[
            ("JWT_SECRET", SECRET),
            ("SEED_ADMIN_EMAIL", "root@shop.test"),
            ("SEED_ADMIN_PASSWORD", "hunter2"),
        ])
        .unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains(SECRET));
    }
}
