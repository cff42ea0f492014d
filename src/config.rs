//! Build-time client configuration

/// Default backend address when `BRAIN_API_URL` is not set at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Local storage key holding the session token.
pub const DEFAULT_TOKEN_KEY: &str = "brain_token";

/// Settings shared by the API client and the auth state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub api_base: String,
    /// Local storage key for the bearer token
    pub token_key: &'static str,
}

impl ClientConfig {
    /// Read the configuration baked in by the build environment.
    pub fn from_build_env() -> Self {
        Self::with_api_base(option_env!("BRAIN_API_URL").unwrap_or(DEFAULT_API_BASE))
    }

    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token_key: DEFAULT_TOKEN_KEY,
        }
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}
