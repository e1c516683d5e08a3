//! Serializable pipeline configuration.
//!
//! Every field has a default, so running without a config file reproduces
//! the fixed endpoints and output names. A TOML file may override any subset:
//!
//! ```toml
//! [source]
//! top_n = 10
//!
//! [output]
//! root = "out"
//! ```

use sectorlens_core::source::SourceConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
}

/// Where exports and charts are written.
///
/// `plot_dir` and both workbook file names are resolved against `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub root: PathBuf,
    pub plot_dir: PathBuf,
    pub combined_file: String,
    pub buy_ratings_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            plot_dir: PathBuf::from("plots"),
            combined_file: "combined_data.xlsx".into(),
            buy_ratings_file: "buy_ratings.xlsx".into(),
        }
    }
}

impl OutputConfig {
    pub fn plot_dir(&self) -> PathBuf {
        self.root.join(&self.plot_dir)
    }

    pub fn combined_path(&self) -> PathBuf {
        self.root.join(&self.combined_file)
    }

    pub fn buy_ratings_path(&self) -> PathBuf {
        self.root.join(&self.buy_ratings_file)
    }
}

impl PipelineConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.top_n == 0 {
            return Err(ConfigError::Invalid("source.top_n must be at least 1".into()));
        }
        if self.source.history_end < self.source.history_start {
            return Err(ConfigError::Invalid(format!(
                "source.history_end ({}) is before source.history_start ({})",
                self.source.history_end, self.source.history_start
            )));
        }
        if self.output.combined_file == self.output.buy_ratings_file {
            return Err(ConfigError::Invalid(
                "output.combined_file and output.buy_ratings_file must differ".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_toml_is_default() {
        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.source.top_n, 50);
        assert_eq!(config.output.combined_path(), PathBuf::from("./combined_data.xlsx"));
        assert_eq!(config.output.plot_dir(), PathBuf::from("./plots"));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            [source]
            top_n = 10
            history_start = "2022-01-01"

            [output]
            root = "out"
            "#,
        )
        .unwrap();
        assert_eq!(config.source.top_n, 10);
        assert_eq!(
            config.source.history_start,
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
        );
        assert_eq!(config.source.user_agent, "Mozilla/5.0");
        assert_eq!(config.output.buy_ratings_path(), PathBuf::from("out/buy_ratings.xlsx"));
    }

    #[test]
    fn zero_top_n_is_rejected() {
        let err = PipelineConfig::from_toml("[source]\ntop_n = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = PipelineConfig::from_toml(
            "[source]\nhistory_start = \"2023-12-31\"\nhistory_end = \"2023-01-01\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("history_end"));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = PipelineConfig::from_toml("[source\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PipelineConfig::from_file(Path::new("/nonexistent/sectorlens.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
