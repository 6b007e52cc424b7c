//! NozzleCal Settings Crate
//!
//! Loads and saves the printer and pattern configuration as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{config_dir, default_config_path, Config, OutputSettings};
pub use error::{SettingsError, SettingsResult};
