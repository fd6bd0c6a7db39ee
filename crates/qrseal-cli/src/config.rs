//! Optional TOML configuration file.

use qrseal_canonical::StampConfig;
use qrseal_render::RenderConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Config path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unknown keys.
    #[error("Configuration error: {0}")]
    Parse(String),
    /// Values parse but contradict each other.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.message().to_string())
    }
}

/// File-level defaults. Command-line flags override every value here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `[render]` and `[render.logo]`.
    pub render: RenderConfig,
    /// `[stamp]`.
    pub stamp: StampConfig,
}

impl Config {
    /// Parses configuration text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.stamp.expiration && !self.stamp.timestamp {
            return Err(ConfigError::Validation(
                "stamp.expiration requires stamp.timestamp".to_string(),
            ));
        }
        let ratio = self.render.logo.ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "render.logo.ratio must be a positive number, got {ratio}"
            )));
        }
        Ok(())
    }
}

/// Loads `path`, or returns defaults when no file was given.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = Config::from_toml(&text)?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrseal_canonical::TimezoneOffset;
    use qrseal_render::LogoMode;

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn reads_all_sections() {
        let config = Config::from_toml(
            r##"
            [render]
            qr_size = 700
            background = "#fafafa"

            [render.logo]
            mode = "embedded"
            path = "brand.png"
            opacity = 200

            [stamp]
            timestamp = true
            timezone = "WITA"
            expiration = true
            "##,
        )
        .unwrap();
        assert_eq!(config.render.qr_size, 700);
        assert_eq!(config.render.logo.mode, LogoMode::Embedded);
        assert_eq!(config.render.logo.opacity, 200);
        assert!(config.stamp.timestamp && config.stamp.expiration);
        assert_eq!(config.stamp.timezone, TimezoneOffset::from_hours(8).unwrap());
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let err = Config::from_toml("[render]\nerror_correction = \"L\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn contradictions_are_validation_errors() {
        let err = Config::from_toml("[stamp]\nexpiration = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        let err = Config::from_toml("[render.logo]\nratio = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load(Some(Path::new("/no/such/qrseal.toml"))).unwrap_err();
        assert!(err.to_string().contains("/no/such/qrseal.toml"));
    }
}
