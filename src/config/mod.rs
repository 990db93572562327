mod defaults;
mod error;
mod loader;

use serde::{Deserialize, Serialize};

pub use self::{
    error::ConfigError,
    loader::{load_configuration, load_configuration_from},
};
use crate::{
    logger::LoggerConfig,
    managers::repository::{RepositoryManagerConfig, RepositoryManagerConfigRaw},
};

/// Hypermedia API surface settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Mount point of the API, first segment of every generated IRI.
    pub api_name: String,
    /// Whether collection reads are paginated at all.
    pub paginate: bool,
    /// Default page size, overridable per request via `limit`.
    pub page_size: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigRaw {
    pub api: ApiConfig,
    pub repository: RepositoryManagerConfigRaw,
    pub logger: LoggerConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub repository: RepositoryManagerConfig,
    pub logger: LoggerConfig,
}

impl ConfigRaw {
    pub fn resolve(self) -> Result<Config, ConfigError> {
        if self.api.page_size <= 0 {
            return Err(ConfigError::InvalidConfig(
                "api.page_size must be positive".to_string(),
            ));
        }

        Ok(Config {
            api: self.api,
            repository: self.repository.resolve()?,
            logger: self.logger,
        })
    }
}
