use marquee_core::allow_list::AdminAllowList;
use marquee_core::routing::RouterMode;

use crate::auth::jwt::JwtConfig;

/// Fallback recipient for contact notifications.
pub const DEFAULT_CONTACT_RECIPIENT: &str = "admin@example.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
///
/// Everything except the JWT secret has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background tasks, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Emails that are administrators regardless of `user_roles`.
    pub admin_emails: AdminAllowList,
    /// How redirect paths in session responses are rendered.
    pub router_mode: RouterMode,
    /// Minimum password length accepted at sign-up (default: `8`).
    pub password_min_length: usize,
    /// Contact notification recipient when neither the request nor
    /// `contact_settings` names one.
    pub contact_default_recipient: String,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                     | Default                  |
    /// |-----------------------------|--------------------------|
    /// | `HOST`                      | `0.0.0.0`                |
    /// | `PORT`                      | `3000`                   |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS`     | `30`                     |
    /// | `ADMIN_EMAILS`              | (empty)                  |
    /// | `USE_HASH_ROUTER`           | `false`                  |
    /// | `PASSWORD_MIN_LENGTH`       | `8`                      |
    /// | `CONTACT_DEFAULT_RECIPIENT` | `admin@example.com`      |
    ///
    /// JWT variables are documented on [`JwtConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3000)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let shutdown_timeout_secs = parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 30)?;
        let jwt = JwtConfig::from_lookup(&lookup)?;

        let admin_emails = AdminAllowList::parse(&lookup("ADMIN_EMAILS").unwrap_or_default());
        let router_mode = RouterMode::from_flag(lookup("USE_HASH_ROUTER").as_deref());
        let password_min_length = parse_or(&lookup, "PASSWORD_MIN_LENGTH", 8)?;

        let contact_default_recipient = lookup("CONTACT_DEFAULT_RECIPIENT")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTACT_RECIPIENT.to_string());

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            admin_emails,
            router_mode,
            password_min_length,
            contact_default_recipient,
        })
    }
}

/// Parse `var` when set, or fall back to `default`.
pub(crate) fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
