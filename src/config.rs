use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional settings file read from the working directory. Every field has a
/// default so the binary runs with no file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    pub db_path: PathBuf,
    pub model: String,
    pub api_base: String,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./db/companion.db"),
            model: "gemini-3-flash-preview".to_string(),
            api_base: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

impl CompanionConfig {
    pub fn load() -> Self {
        Self::load_from("./companion.yml")
    }

    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable {}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config = CompanionConfig::default();
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.db_path, PathBuf::from("./db/companion.db"));
        assert!(config.api_base.starts_with("https://"));
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_the_rest() {
        let config: CompanionConfig = serde_yaml::from_str("model: gemini-2.5-pro\n").unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.db_path, PathBuf::from("./db/companion.db"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = CompanionConfig::load_from("./definitely-not-here.yml");
        assert_eq!(config.model, CompanionConfig::default().model);
    }
}
