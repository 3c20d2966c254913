mod init;
mod schema;

pub use init::run_init;
pub use schema::Config;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/pdca-advisor/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("pdca-advisor")
}

/// Get the default config file path (~/.config/pdca-advisor/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Parse a structured document, picking the parser by file extension:
/// `.json` parses as JSON, everything else as YAML.
pub fn parse_document<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(content)
            .with_context(|| format!("Invalid JSON in {}", path.display())),
        _ => serde_saphyr::from_str(content)
            .with_context(|| format!("Invalid YAML in {}", path.display())),
    }
}

/// Load configuration from a YAML (or JSON) file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path
///   (~/.config/pdca-advisor/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The document cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Run `pdca-advisor init` to create one",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    parse_document(&config_path, &config_content)
        .with_context(|| format!("Failed to parse config at {}", config_path.display()))
}
