use std::path::Path;

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};

use super::{defaults, Config, ConfigError, ConfigRaw};

/// Load configuration from `config.toml` in the working directory.
pub fn load_configuration() -> Result<Config, ConfigError> {
    load_configuration_from("config.toml")
}

/// Load configuration from a specific TOML file, layered over the defaults.
/// The `DB_PASSWORD` environment variable supplies the database password
/// when the file leaves it unset.
pub fn load_configuration_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::MissingConfig(path.display().to_string()));
    }

    tracing::info!(path = %path.display(), "Loading configuration");

    let mut config: ConfigRaw = Figment::from(Serialized::defaults(defaults::config()))
        .merge(Toml::file(path))
        .extract()
        .map_err(Box::new)?;

    if config.repository.password.is_none() {
        config.repository.password = std::env::var("DB_PASSWORD").ok();
    }

    config.resolve()
}
