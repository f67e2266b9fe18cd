//! Configuration bootstrapping for the CLI runtime.

use stencil_config::{
    CliOverrides, ConfigError, ConfigRequest, ConfigStore, LoadedConfig, load_settings,
};
use tracing::debug;

const CONFIG_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::config");

pub(crate) trait ConfigLoader {
    /// Resolves every configuration layer and validates the result.
    fn load(&self, overrides: &CliOverrides) -> Result<LoadedConfig, ConfigError>;
}

/// Loads from the working directory and the process environment.
pub(crate) struct LayeredConfigLoader;

impl ConfigLoader for LayeredConfigLoader {
    fn load(&self, overrides: &CliOverrides) -> Result<LoadedConfig, ConfigError> {
        let base = ConfigStore::from_current_dir()?;
        let request = ConfigRequest {
            base_dir: base.base_dir().to_path_buf(),
            overrides: overrides.clone(),
            environment: std::env::vars_os().collect(),
        };
        load_settings(&request)
    }
}

/// Logs which layer supplied each configuration value.
pub(crate) fn log_provenance(store: &ConfigStore) {
    for (key, value, layer) in store.iter() {
        debug!(
            target: CONFIG_TARGET,
            key = %key,
            value = %value,
            layer = %layer,
            "configuration value resolved"
        );
    }
}
