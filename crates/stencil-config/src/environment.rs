use std::ffi::OsString;

use strum::IntoEnumIterator;

use crate::keys::ConfigKey;

/// Prefix shared by every environment variable the loader reads.
pub const ENV_PREFIX: &str = "STENCIL_";

/// Environment variable naming the configuration file when `--config` is absent.
pub const CONFIG_PATH_ENV_VAR: &str = "STENCIL_CONFIG";

/// Maps an environment variable name to the key it overrides.
pub(crate) fn key_for_var(name: &str) -> Option<ConfigKey> {
    if !name.starts_with(ENV_PREFIX) {
        return None;
    }
    ConfigKey::iter().find(|key| key.env_var() == name)
}

/// Looks up `name` in a captured environment. Non-UTF-8 values are ignored.
pub(crate) fn lookup<I>(vars: I, name: &str) -> Option<String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .find(|(key, _)| key == name)
        .and_then(|(_, value)| value.into_string().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_variables() {
        assert_eq!(
            key_for_var("STENCIL_LOG_MAX_SIZE"),
            Some(ConfigKey::LogMaxSize)
        );
        assert_eq!(key_for_var("STENCIL_CONFIG"), None);
        assert_eq!(key_for_var("LOG_MAX_SIZE"), None);
    }

    #[test]
    fn looks_up_captured_values() {
        let vars = vec![(OsString::from(CONFIG_PATH_ENV_VAR), OsString::from("a.yaml"))];
        assert_eq!(lookup(vars, CONFIG_PATH_ENV_VAR).as_deref(), Some("a.yaml"));
    }
}
