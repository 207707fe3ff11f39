//! Application configuration schemas.
//!
//! Configuration is deserialized from an optional TOML file overlaid with
//! `TESTHOST__*` environment variables via the `config` crate. Every
//! section has defaults, so an absent file yields a usable configuration.

pub mod logging;
pub mod plugin;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::plugin::PluginConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Plugin module settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables prefixed with
    /// `TESTHOST__` override file values, e.g.
    /// `TESTHOST__PLUGINS__REQUIRE=timing,fixtures`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        Self::load_from(path.as_ref(), None)
    }

    /// Like [`AppConfig::load`], reading variables from `env` instead of
    /// the process environment when it is given.
    fn load_from(path: &Path, env: Option<config::Map<String, String>>) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("TESTHOST")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("plugins.require")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("testhost.toml");
        std::fs::write(&path, contents).expect("write config");
        path
    }

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config =
            AppConfig::load_from(&dir.path().join("missing.toml"), env(&[])).expect("defaults");

        assert!(config.plugins.require.is_empty());
        assert!(config.plugins.fail_on_unknown);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(
            &dir,
            r#"
[plugins]
require = ["timing", "fixtures"]
fail_on_unknown = false

[logging]
level = "debug"
"#,
        );

        let config = AppConfig::load_from(&path, env(&[])).expect("load");
        assert_eq!(config.plugins.require, vec!["timing", "fixtures"]);
        assert!(!config.plugins.fail_on_unknown);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[plugins]\nrequire = [\"helpers\"]\n");

        let config = AppConfig::load_from(
            &path,
            env(&[
                ("TESTHOST__PLUGINS__REQUIRE", "timing,fixtures"),
                ("TESTHOST__PLUGINS__FAIL_ON_UNKNOWN", "false"),
                ("TESTHOST__LOGGING__FORMAT", "json"),
                ("UNRELATED__PLUGINS__REQUIRE", "ignored"),
            ]),
        )
        .expect("load");

        assert_eq!(config.plugins.require, vec!["timing", "fixtures"]);
        assert!(!config.plugins.fail_on_unknown);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[plugins]\nrequire = [\"timing\"\n");

        let err = AppConfig::load_from(&path, env(&[])).expect_err("should fail");
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
