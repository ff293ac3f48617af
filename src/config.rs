use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://dog-disease-classification.onrender.com";

/// 2 MiB, the strictest limit any deployment enforces.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;

/// Deployment configuration. The bits that used to drift between the
/// copy-pasted front-end variants (endpoint, positive-label set, size limit,
/// wording) live here instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the classifier service; `/predict` is appended.
    pub endpoint: String,
    /// Window title, e.g. "Bacterial Dermatoses".
    pub title: String,
    /// Category name used in negative verdicts, e.g. "bacterial dermatoses".
    pub category: String,
    /// Classes that count as a detection; anything else renders as Negative.
    pub positive_labels: Vec<String>,
    /// Reject selections larger than this. `None` disables the check.
    pub max_upload_bytes: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self::bacterial()
    }
}

impl Config {
    /// The bacterial-dermatoses deployment.
    pub fn bacterial() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            title: "Bacterial Dermatoses".to_string(),
            category: "bacterial dermatoses".to_string(),
            positive_labels: vec!["Pyoderma".to_string()],
            max_upload_bytes: Some(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    /// The parasitic-dermatoses deployment.
    pub fn parasitic() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            title: "Parasitic Dermatoses".to_string(),
            category: "parasitic dermatoses".to_string(),
            positive_labels: vec!["Demodecosis".to_string(), "Scabies".to_string()],
            max_upload_bytes: Some(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    /// Directory: ~/.config/derma-scan/
    fn dir() -> PathBuf {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("derma-scan");
        p
    }

    fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load from disk, returning deployment defaults if the file doesn't
    /// exist or is invalid. DERMA_SCAN_DEPLOYMENT ("bacterial" or
    /// "parasitic") picks which defaults; one build serves both deployments.
    pub fn load() -> Self {
        let path = Self::path();
        match fs::read_to_string(&path) {
            Ok(data) => {
                serde_json::from_str(&data).unwrap_or_else(|_| Self::deployment_default())
            }
            Err(_) => Self::deployment_default(),
        }
    }

    fn deployment_default() -> Self {
        match std::env::var("DERMA_SCAN_DEPLOYMENT").as_deref() {
            Ok("parasitic") => Self::parasitic(),
            _ => Self::bacterial(),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let dir = Self::dir();
        fs::create_dir_all(&dir)?;
        let data = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(), data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_bacterial_deployment() {
        let config = Config::default();
        assert_eq!(config.title, "Bacterial Dermatoses");
        assert_eq!(config.positive_labels, vec!["Pyoderma".to_string()]);
        assert_eq!(config.max_upload_bytes, Some(2 * 1024 * 1024));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn parasitic_preset_has_both_labels() {
        let config = Config::parasitic();
        assert_eq!(
            config.positive_labels,
            vec!["Demodecosis".to_string(), "Scabies".to_string()]
        );
        assert_eq!(config.category, "parasitic dermatoses");
    }

    #[test]
    fn survives_a_json_round_trip() {
        let config = Config::parasitic();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.positive_labels, config.positive_labels);
        assert_eq!(back.max_upload_bytes, config.max_upload_bytes);
    }
}
