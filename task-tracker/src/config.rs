use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "data_file.json";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Looked up in the working directory, with any supported extension.
pub const DEFAULT_CONFIG_NAME: &str = "task-tracker";
pub const ENV_PREFIX: &str = "TASK_TRACKER";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Layers defaults, a config file and `TASK_TRACKER_*` environment variables.
    ///
    /// An explicit `path` must exist; the default `task-tracker.*` file is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::from_sources(path, Some(config::Environment::with_prefix(ENV_PREFIX)))
    }

    fn from_sources(
        path: Option<&Path>,
        environment: Option<config::Environment>,
    ) -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .set_default("data_file", DEFAULT_DATA_FILE)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?;
        let builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };
        let builder = match environment {
            Some(environment) => builder.add_source(environment),
            None => builder,
        };

        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn max_level(&self) -> anyhow::Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown log level {:?}", self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    fn config_file(temp: &TempDir, contents: &str) -> assert_fs::fixture::ChildPath {
        let file = temp.child("tracker.toml");
        file.write_str(contents).unwrap();
        file
    }

    #[test]
    fn defaults_apply_to_an_empty_config_file() {
        let temp = TempDir::new().unwrap();
        let file = config_file(&temp, "");

        let config = Config::from_sources(Some(file.path()), None).unwrap();

        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        // Arrange
        let temp = TempDir::new().unwrap();
        let file = config_file(
            &temp,
            r#"
            data_file = "/tmp/my-tasks.json"
            log_level = "debug"
            "#,
        );

        // Act
        let config = Config::from_sources(Some(file.path()), None).unwrap();

        // Assert
        assert_eq!(config.data_file, PathBuf::from("/tmp/my-tasks.json"));
        assert_eq!(config.max_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let temp = TempDir::new().unwrap();
        let file = config_file(&temp, r#"log_level = "info""#);

        let config = Config::from_sources(Some(file.path()), None).unwrap();

        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn environment_overrides_file() {
        let temp = TempDir::new().unwrap();
        let file = config_file(&temp, r#"data_file = "from-file.json""#);
        let environment = config::Environment::with_prefix("TRACKER_TEST").source(Some(
            config::Map::from([(
                "TRACKER_TEST_DATA_FILE".to_string(),
                "from-env.json".to_string(),
            )]),
        ));

        let config = Config::from_sources(Some(file.path()), Some(environment)).unwrap();

        assert_eq!(config.data_file, PathBuf::from("from-env.json"));
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();

        assert!(Config::from_sources(Some(temp.child("absent.toml").path()), None).is_err());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let config = Config {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: "chatty".to_string(),
        };

        assert!(config.max_level().is_err());
    }
}
