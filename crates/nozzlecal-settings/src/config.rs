//! Configuration file management
//!
//! A [`Config`] bundles the printer description, the pattern dimensions and
//! output preferences. Files are JSON or TOML, chosen by extension; every
//! section is optional and falls back to its defaults.

use crate::error::{SettingsError, SettingsResult};
use nozzlecal_core::{PatternParameters, PrinterConfiguration};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where generated G-code is written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory relative file names are resolved against
    pub directory: PathBuf,
    /// File name of the interlocked calibration print
    pub interlocked_file: String,
    /// File name of the meander print
    pub meander_file: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            interlocked_file: "interlocked_calibration_pattern.gcode".to_string(),
            meander_file: "meander_print.gcode".to_string(),
        }
    }
}

impl OutputSettings {
    pub fn interlocked_path(&self) -> PathBuf {
        self.directory.join(&self.interlocked_file)
    }

    pub fn meander_path(&self) -> PathBuf {
        self.directory.join(&self.meander_file)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Tool changer and print settings
    pub printer: PrinterConfiguration,
    /// Calibration pattern dimensions
    pub pattern: PatternParameters,
    /// Output preferences
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or_default().to_string(),
        )),
    }
}

impl Config {
    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), tools = config.printer.tools.len(), "config loaded");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Load `path` if given, else the default config file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match default_config_path() {
            Ok(default_path) if default_path.exists() => Self::load_from_file(&default_path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> SettingsResult<()> {
        self.printer.validate()?;
        self.pattern.validate()?;
        Ok(())
    }
}

/// Platform config directory of the application
pub fn config_dir() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("nozzlecal"))
        .ok_or_else(|| SettingsError::ConfigDirectory("no config directory on this platform".into()))
}

/// Default location of the config file
pub fn default_config_path() -> SettingsResult<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(format_of(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(format_of(Path::new("dir/b.toml")).unwrap(), Format::Toml);
        assert!(matches!(
            format_of(Path::new("c.yaml")),
            Err(SettingsError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
        assert!(format_of(Path::new("noext")).is_err());
    }

    #[test]
    fn test_output_paths() {
        let output = OutputSettings {
            directory: PathBuf::from("out"),
            ..OutputSettings::default()
        };
        assert_eq!(
            output.meander_path(),
            PathBuf::from("out").join("meander_print.gcode")
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [pattern]
            length = 40.0

            [printer]
            bed_temperature = 70.0
            "#,
        )
        .unwrap();
        assert_eq!(config.pattern.length, 40.0);
        assert_eq!(config.pattern.width, 8.0);
        assert_eq!(config.printer.bed_temperature, 70.0);
        assert_eq!(config.printer.tools.len(), 5);
    }

    #[test]
    fn test_default_config_path() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("nozzlecal/config.toml"));
        }
    }
}
