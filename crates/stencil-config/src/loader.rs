use std::ffi::OsString;

use camino::Utf8PathBuf;

use crate::environment::{self, CONFIG_PATH_ENV_VAR};
use crate::errors::ConfigError;
use crate::overrides::CliOverrides;
use crate::settings::Settings;
use crate::store::ConfigStore;
use crate::validate::Validator;

/// Inputs for one configuration load.
#[derive(Debug, Clone, Default)]
pub struct ConfigRequest {
    /// Directory relative paths resolve against.
    pub base_dir: Utf8PathBuf,
    /// Flags parsed from the command line.
    pub overrides: CliOverrides,
    /// Captured process environment.
    pub environment: Vec<(OsString, OsString)>,
}

impl ConfigRequest {
    /// Configuration file named by `--config`, falling back to `STENCIL_CONFIG`.
    #[must_use]
    pub fn config_path(&self) -> Option<String> {
        self.overrides
            .config
            .clone()
            .or_else(|| environment::lookup(self.environment.iter().cloned(), CONFIG_PATH_ENV_VAR))
    }
}

/// Populated store together with the settings validated from it.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Store after every layer was applied.
    pub store: ConfigStore,
    /// Validated settings.
    pub settings: Settings,
}

/// Applies defaults, file, environment, and flags, then validates.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] when the file
/// cannot be loaded, in which case validation does not run, and
/// [`ConfigError::Validation`] with every invalid value otherwise.
pub fn load_settings(request: &ConfigRequest) -> Result<LoadedConfig, ConfigError> {
    let mut store = ConfigStore::new(request.base_dir.clone());
    store.set_defaults();
    if let Some(path) = request.config_path() {
        store.load_from_file(&path)?;
    }
    store.overlay_environment(request.environment.iter().cloned());
    store.override_from_cli(&request.overrides);

    let settings = Validator::new(request.base_dir.clone()).validate(&store)?;
    Ok(LoadedConfig { store, settings })
}
