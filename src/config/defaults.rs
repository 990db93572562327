use crate::{
    config::{ApiConfig, ConfigRaw},
    logger::{LogFormat, LoggerConfig},
    managers::repository::RepositoryManagerConfigRaw,
};

/// Baseline configuration merged below any config file the caller supplies.
pub(crate) fn config() -> ConfigRaw {
    ConfigRaw {
        api: ApiConfig {
            api_name: "api".to_string(),
            paginate: true,
            page_size: 10,
        },
        repository: RepositoryManagerConfigRaw {
            user: "hydra".to_string(),
            password: None,
            database: "hydra".to_string(),
            host: "localhost".to_string(),
            port: 3306,
            max_connections: 10,
            min_connections: 1,
        },
        logger: LoggerConfig {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        },
    }
}
