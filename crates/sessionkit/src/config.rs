//! Facade configuration: cookie parameters and the two-phase builder.
//!
//! Everything that must be decided before `start()` lives here. Building the
//! configuration up front replaces the implicit "call this setter before
//! start" temporal contracts found in runtime-global session APIs.

use serde::{Deserialize, Serialize};

/// Default cookie/parameter name carrying the session identifier.
pub const DEFAULT_SESSION_NAME: &str = "SESSIONID";

/// How the identifier cookie should be transmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieParams {
    /// Cookie lifetime in seconds. Zero means a session cookie that lasts
    /// until the browser closes.
    pub lifetime_secs: u64,
    /// Path on the domain where the cookie is valid.
    pub path: String,
    /// Cookie domain. Empty restricts the cookie to the issuing host.
    pub domain: String,
    /// Send only over secure connections.
    pub secure: bool,
    /// Hide the cookie from client-side scripts.
    pub http_only: bool,
}

impl Default for CookieParams {
    fn default() -> Self {
        Self {
            lifetime_secs: 0,
            path: "/".to_string(),
            domain: String::new(),
            secure: false,
            http_only: false,
        }
    }
}

/// Immutable facade configuration.
///
/// Built fully before the [`Session`](crate::Session) is constructed, either
/// through [`SessionConfig::builder`] or by deserializing a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie/parameter name carrying the session identifier.
    pub name: String,
    /// When false the facade reports `Disabled` and every operation is inert.
    pub enabled: bool,
    /// Whether the identifier travels in a cookie.
    pub use_cookies: bool,
    /// Identifier cookie transmission parameters.
    pub cookie: CookieParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SESSION_NAME.to_string(),
            enabled: true,
            use_cookies: true,
            cookie: CookieParams::default(),
        }
    }
}

impl SessionConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Load a configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults, so a partial file is valid.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}

/// Two-phase builder for [`SessionConfig`].
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the cookie/parameter name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Enable or disable sessions entirely.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Control whether the identifier travels in a cookie.
    pub fn use_cookies(mut self, use_cookies: bool) -> Self {
        self.config.use_cookies = use_cookies;
        self
    }

    /// Set the identifier cookie parameters.
    pub fn cookie_params(mut self, cookie: CookieParams) -> Self {
        self.config.cookie = cookie;
        self
    }

    /// Finish building.
    pub fn build(self) -> SessionConfig {
        self.config
    }
}
