//! Application configuration.
//!
//! # Responsibility
//! - Describe runtime settings shared by FFI and CLI entry points.
//! - Load settings from an optional JSON file plus environment overrides.
//!
//! # Invariants
//! - Every field has a default; an empty `{}` file is a valid config.
//! - `data_dir` is absolute after [`AppConfig::resolve`].

use crate::logging::normalize_level;
use crate::model::language::Language;
use crate::suggest::debouncer::DebounceConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Overrides `data_dir` when set to a non-blank value.
pub const ENV_DATA_DIR: &str = "SANCTORUM_DATA_DIR";
/// Overrides `log_level` when set to a non-blank value.
pub const ENV_LOG_LEVEL: &str = "SANCTORUM_LOG_LEVEL";

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
const DEFAULT_DATA_DIR_NAME: &str = "sanctorum";
const DATABASE_FILE_NAME: &str = "sanctorum.sqlite3";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root for the database and `logs/` directory.
    pub data_dir: PathBuf,
    pub log_level: String,
    /// UI and response language.
    pub language: Language,
    /// Text model id sent with every structured request.
    pub model: String,
    pub image_model: String,
    pub debounce: DebounceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME),
            log_level: crate::logging::default_log_level().to_string(),
            language: Language::default(),
            model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            debounce: DebounceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads a JSON config file, then applies environment overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let config = match std::fs::read(path) {
            Ok(bytes) => serde_json::from_slice::<AppConfig>(&bytes).map_err(|source| {
                ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        config.resolve()
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> ConfigResult<Self> {
        AppConfig::default().resolve()
    }

    /// Applies env overrides and validates the result.
    pub fn resolve(mut self) -> ConfigResult<Self> {
        if let Some(dir) = non_blank_env(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = non_blank_env(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.data_dir.is_absolute() {
            return Err(ConfigError::Invalid(format!(
                "data_dir must be absolute, got `{}`",
                self.data_dir.display()
            )));
        }
        normalize_level(&self.log_level).map_err(ConfigError::Invalid)?;
        if self.model.trim().is_empty() || self.image_model.trim().is_empty() {
            return Err(ConfigError::Invalid("model ids must not be blank".to_string()));
        }
        self.debounce.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use crate::model::language::Language;
    use std::io::Write;

    #[test]
    fn empty_object_yields_defaults() {
        let config: AppConfig = serde_json::from_str("{}").expect("empty config parses");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.debounce.min_chars, 3);
        assert_eq!(config.debounce.quiet_period_ms, 300);
    }

    #[test]
    fn load_reads_partial_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&path).expect("create config");
        write!(
            file,
            r#"{{"language":"es","data_dir":{:?}}}"#,
            dir.path().to_str().expect("utf-8 temp dir")
        )
        .expect("write config");

        let config = AppConfig::load(&path).expect("config loads");
        assert_eq!(config.language, Language::Es);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.database_path().starts_with(dir.path()));
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = AppConfig::load(dir.path().join("absent.json")).expect("defaults");
        assert_eq!(config.image_model, "imagen-4.0-generate-001");
    }

    #[test]
    fn load_reports_malformed_json() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").expect("write config");

        let err = AppConfig::load(&path).expect_err("malformed config must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn validate_rejects_relative_data_dir_and_bad_level() {
        let mut config = AppConfig {
            data_dir: "relative/dir".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        config.data_dir = std::env::temp_dir();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
