//! Configuration management for crewrate.
//!
//! This crate discovers the `.crewrate/` project directory and loads the
//! layered settings stored in `.crewrate/config.yaml`.

pub mod crewrate_dir;
pub mod settings;

pub use settings::{ConfigError, EstimateSettings, Settings, load_settings, save_settings};
