/// Configuration for graduation credit requirements
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Credit thresholds and category-matching patterns.
///
/// Loaded from a JSON file at startup; every field has the institutional
/// default so a missing file or partial file still works.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditsConfig {
    #[serde(default = "default_graduation_total")]
    pub graduation_total: i32,
    #[serde(default = "default_general_required")]
    pub general_required: i32,
    #[serde(default = "default_major_required")]
    pub major_required: i32,
    #[serde(default = "default_elective_required")]
    pub elective_required: i32,
    #[serde(default = "default_program_min")]
    pub program_min: i32,
    /// SQL LIKE pattern selecting major-required courses by required_type.
    #[serde(default = "default_major_pattern")]
    pub major_required_pattern: String,
    /// SQL LIKE pattern selecting general-required courses by required_type.
    #[serde(default = "default_general_pattern")]
    pub general_required_pattern: String,
}

fn default_graduation_total() -> i32 {
    128
}
fn default_general_required() -> i32 {
    28
}
fn default_major_required() -> i32 {
    65
}
fn default_elective_required() -> i32 {
    35
}
fn default_program_min() -> i32 {
    20
}
fn default_major_pattern() -> String {
    "%Major Required%".to_string()
}
fn default_general_pattern() -> String {
    "%General Required%".to_string()
}

impl CreditsConfig {
    /// Loads the config from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Default for CreditsConfig {
    fn default() -> Self {
        serde_json::from_str("{}").expect("defaults always deserialize")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = CreditsConfig::default();
        assert_eq!(cfg.graduation_total, 128);
        assert_eq!(cfg.major_required, 65);
        assert_eq!(cfg.general_required, 28);
        assert_eq!(cfg.elective_required, 35);
        assert_eq!(cfg.program_min, 20);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: CreditsConfig = serde_json::from_str(r#"{"graduation_total": 140}"#).unwrap();
        assert_eq!(cfg.graduation_total, 140);
        assert_eq!(cfg.program_min, 20);
    }
}
