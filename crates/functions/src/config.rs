use crate::misc::SERVER_VERSION;

pub const SERVER_VERSION_ENV: &str = "SKIFFSQL_SERVER_VERSION";

/// Settings fixed when the function registry is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    /// String returned by `VERSION()`.
    pub server_version: String,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            server_version: SERVER_VERSION.to_string(),
        }
    }
}

impl FunctionConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(version) = lookup(SERVER_VERSION_ENV) {
            let version = version.trim();
            if !version.is_empty() {
                config.server_version = version.to_string();
            }
        }
        config
    }

    pub fn with_server_version(mut self, server_version: impl Into<String>) -> Self {
        self.server_version = server_version.into();
        self
    }
}
