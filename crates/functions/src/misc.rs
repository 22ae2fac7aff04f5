use crate::context::BuildInfo;

/// Version string reported by `VERSION()`. Clients parse the leading MySQL
/// compatibility version, so that prefix must stay first.
pub const SERVER_VERSION: &str = concat!("8.0.11-SkiffSQL-", env!("CARGO_PKG_VERSION"));

pub const RELEASE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const EDITION: &str = "Community";

/// Build description compiled into the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticBuildInfo {
    pub release_version: String,
    pub edition: String,
    pub target: String,
}

impl StaticBuildInfo {
    pub fn current() -> Self {
        Self {
            release_version: RELEASE_VERSION.to_string(),
            edition: EDITION.to_string(),
            target: format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS),
        }
    }
}

impl BuildInfo for StaticBuildInfo {
    fn engine_info(&self) -> String {
        format!(
            "Release Version: {}\nEdition: {}\nTarget: {}",
            self.release_version, self.edition, self.target
        )
    }
}
