//! Parse rate scenario files (JSON, TOML and YAML) into a [`RateConfig`].

use std::path::Path;

use crewrate_core::model::RateConfig;
use serde::de::DeserializeOwned;

/// Errors that can occur while loading a scenario file.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("parse error in {format}: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a scenario from a JSON string.
pub fn parse_json(content: &str) -> Result<RateConfig, ScenarioError> {
    parse_json_as(content)
}

/// Parse a scenario from a TOML string.
pub fn parse_toml(content: &str) -> Result<RateConfig, ScenarioError> {
    parse_toml_as(content)
}

/// Parse a scenario from a YAML string.
pub fn parse_yaml(content: &str) -> Result<RateConfig, ScenarioError> {
    parse_yaml_as(content)
}

/// Load a scenario from a file path (format picked by extension).
pub fn load_scenario(path: &Path) -> Result<RateConfig, ScenarioError> {
    load_document(path)
}

/// Load any serde document (scenario, estimate, ...) from a file.
///
/// `.json`, `.toml`, `.yaml` and `.yml` are parsed as such; any other
/// extension is tried as JSON, then TOML, then YAML, and the JSON error is
/// reported if all three fail.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, ScenarioError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json_as(&content),
        Some("toml") => parse_toml_as(&content),
        Some("yaml") | Some("yml") => parse_yaml_as(&content),
        _ => parse_json_as(&content)
            .or_else(|json_err| {
                parse_toml_as(&content)
                    .or_else(|_| parse_yaml_as(&content))
                    .map_err(|_| json_err)
            }),
    }
}

fn parse_json_as<T: DeserializeOwned>(content: &str) -> Result<T, ScenarioError> {
    serde_json::from_str(content).map_err(|e| ScenarioError::Parse {
        format: "JSON",
        message: e.to_string(),
    })
}

fn parse_toml_as<T: DeserializeOwned>(content: &str) -> Result<T, ScenarioError> {
    toml::from_str(content).map_err(|e| ScenarioError::Parse {
        format: "TOML",
        message: e.to_string(),
    })
}

fn parse_yaml_as<T: DeserializeOwned>(content: &str) -> Result<T, ScenarioError> {
    serde_yaml::from_str(content).map_err(|e| ScenarioError::Parse {
        format: "YAML",
        message: e.to_string(),
    })
}
