//! 客户端配置：应用标识、订阅密钥与服务端点。
//!
//! Client configuration.
//!
//! [`LuisConfig`] is built once and shared read-only by the transport and the
//! store client. It can be assembled directly or read from the environment:
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `LUIS_APP_ID` | Application identifier | required |
//! | `LUIS_SUBSCRIPTION_KEY` | Subscription credential | keyring, then required |
//! | `LUIS_BASE_URL` | Scheme, host and port of the service | `https://api.projectoxford.ai:443` |
//! | `LUIS_HTTP_TIMEOUT_SECS` | Per-request timeout | reqwest default (none) |

mod manifest;

pub use manifest::DesiredState;

use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.projectoxford.ai:443";
pub const DEFAULT_BASE_PATH: &str = "/luis/v1.0/prog/apps/";
pub const KEYRING_SERVICE: &str = "luis-sync";

/// Immutable configuration for a single LUIS application.
#[derive(Clone, PartialEq, Eq)]
pub struct LuisConfig {
    application_id: String,
    subscription_key: String,
    base_url: String,
    base_path: String,
    timeout: Option<Duration>,
}

impl LuisConfig {
    /// Create a configuration pointing at the public service.
    pub fn new(application_id: impl Into<String>, subscription_key: impl Into<String>) -> Result<Self> {
        let application_id = application_id.into();
        let subscription_key = subscription_key.into();

        if application_id.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "application id is required",
                ErrorContext::new()
                    .with_field_path("application_id")
                    .with_source("config"),
            ));
        }
        if subscription_key.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "subscription key is required",
                ErrorContext::new()
                    .with_field_path("subscription_key")
                    .with_source("config"),
            ));
        }

        Ok(Self {
            application_id,
            subscription_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout: None,
        })
    }

    /// Read the configuration from `LUIS_*` environment variables.
    ///
    /// The subscription key falls back to the OS keyring entry
    /// (`luis-sync`, `<application id>`) when the variable is unset.
    pub fn from_env() -> Result<Self> {
        let application_id = env::var("LUIS_APP_ID").map_err(|_| {
            Error::configuration_with_context(
                "application id is required",
                ErrorContext::new()
                    .with_field_path("LUIS_APP_ID")
                    .with_source("env"),
            )
        })?;

        let subscription_key = env::var("LUIS_SUBSCRIPTION_KEY")
            .ok()
            .or_else(|| Self::keyring_key(&application_id))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "subscription key is required",
                    ErrorContext::new()
                        .with_field_path("LUIS_SUBSCRIPTION_KEY")
                        .with_details("not set in the environment or the OS keyring")
                        .with_source("env"),
                )
            })?;

        let mut config = Self::new(application_id, subscription_key)?;

        if let Ok(base_url) = env::var("LUIS_BASE_URL") {
            config = config.with_base_url(base_url)?;
        }
        if let Ok(raw) = env::var("LUIS_HTTP_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                Error::configuration_with_context(
                    "timeout must be a whole number of seconds",
                    ErrorContext::new()
                        .with_field_path("LUIS_HTTP_TIMEOUT_SECS")
                        .with_details(raw.clone())
                        .with_source("env"),
                )
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    fn keyring_key(application_id: &str) -> Option<String> {
        let entry = Entry::new(KEYRING_SERVICE, application_id).ok()?;
        entry.get_password().ok()
    }

    /// Override the service origin (primarily for testing with mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let parsed = url::Url::parse(&base_url).map_err(|e| {
            Error::configuration_with_context(
                "invalid base url",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(format!("{}: {}", base_url, e))
                    .with_source("config"),
            )
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::configuration_with_context(
                "base url must use http or https",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(base_url)
                    .with_source("config"),
            ));
        }
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Override the path prefix that precedes the application id.
    pub fn with_base_path(mut self, base_path: impl AsRef<str>) -> Self {
        let trimmed = base_path.as_ref().trim_matches('/');
        self.base_path = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn subscription_key(&self) -> &str {
        &self.subscription_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Full URL of a resource inside this application's classifier collection.
    pub fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}{}{}/{}",
            self.base_url,
            self.base_path,
            self.application_id,
            resource.trim_start_matches('/')
        )
    }
}

// The subscription key must never end up in logs.
impl fmt::Debug for LuisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LuisConfig")
            .field("application_id", &self.application_id)
            .field("subscription_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("base_path", &self.base_path)
            .field("timeout", &self.timeout)
            .finish()
    }
}
