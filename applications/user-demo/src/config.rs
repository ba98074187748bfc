/// Demo configuration
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use user_client::ClientConfig;

/// Config file read when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG_FILE: &str = "user-demo.toml";

/// Prefix for environment overrides, e.g. `USER_DEMO__CLIENT__BASE_URL`.
pub const ENV_PREFIX: &str = "USER_DEMO";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub client: ClientConfig,
}

impl DemoConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Same as [`DemoConfig::load`], reading overrides from `<env_prefix>__*`.
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> anyhow::Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            // An explicit file must exist
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build().context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[client]\nbase_url = \"http://localhost:9000/users\"\ntimeout_secs = 5"
        )
        .unwrap();

        let config = DemoConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.client.base_url, "http://localhost:9000/users");
        assert_eq!(config.client.timeout_secs, 5);
        // Untouched fields keep their defaults
        assert_eq!(config.client.connect_timeout_secs, 10);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();

        let config = DemoConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.client.timeout_secs, ClientConfig::default().timeout_secs);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(DemoConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_malformed_file_fails() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[client]\ntimeout_secs = \"soon\"").unwrap();

        assert!(DemoConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        // Prefix private to this test so parallel tests are unaffected
        let prefix = "USER_DEMO_ENV_LAYER";
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[client]\nbase_url = \"http://file.example.com/users\"\ntimeout_secs = 5"
        )
        .unwrap();

        std::env::set_var(
            format!("{}__CLIENT__BASE_URL", prefix),
            "http://env.example.com/users",
        );
        std::env::set_var(format!("{}__CLIENT__CONNECT_TIMEOUT_SECS", prefix), "3");
        let config = DemoConfig::load_with_prefix(Some(file.path()), prefix);
        std::env::remove_var(format!("{}__CLIENT__BASE_URL", prefix));
        std::env::remove_var(format!("{}__CLIENT__CONNECT_TIMEOUT_SECS", prefix));

        let config = config.unwrap();
        assert_eq!(config.client.base_url, "http://env.example.com/users");
        assert_eq!(config.client.connect_timeout_secs, 3);
        // Keys absent from the environment still come from the file
        assert_eq!(config.client.timeout_secs, 5);
    }
}
