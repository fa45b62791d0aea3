/// Server configuration
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Optional path to the credits configuration JSON.
    #[serde(default)]
    pub credits_config: Option<PathBuf>,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_db_path() -> String {
    "coursereg.db".to_string()
}

impl AppConfig {
    /// Loads the config from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            db_path: default_db_path(),
            credits_config: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{"db_path": "/tmp/x.db"}"#).unwrap();
        assert_eq!(cfg.db_path, "/tmp/x.db");
        assert_eq!(cfg.bind_address, "0.0.0.0:8080");
        assert!(cfg.credits_config.is_none());
    }
}
