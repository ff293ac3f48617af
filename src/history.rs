use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::classifier::Prediction;

/// A single completed scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub class: String,
    pub confidence: f64,
    pub positive: bool,
    pub timestamp: String,
}

/// Persistent scan history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    pub total_scans: usize,
    pub total_positive: usize,
    #[serde(default)]
    pub records: Vec<ScanRecord>,
}

impl History {
    /// Directory: ~/.local/share/derma-scan/
    fn dir() -> PathBuf {
        let mut p = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("derma-scan");
        p
    }

    fn path() -> PathBuf {
        Self::dir().join("history.json")
    }

    /// Load from disk, returning defaults if missing.
    pub fn load() -> Self {
        let path = Self::path();
        match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => Self::default(),
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

    /// Record a completed scan.
    pub fn record_scan(&mut self, prediction: &Prediction, positive: bool) {
        self.total_scans += 1;
        if positive {
            self.total_positive += 1;
        }
        self.records.push(ScanRecord {
            class: prediction.class.clone(),
            confidence: prediction.confidence,
            positive,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_scan_keeps_the_totals_in_step() {
        let mut history = History::default();

        let pyoderma = Prediction {
            class: "Pyoderma".to_string(),
            confidence: 0.9321,
        };
        let healthy = Prediction {
            class: "Healthy".to_string(),
            confidence: 0.8,
        };

        history.record_scan(&pyoderma, true);
        history.record_scan(&healthy, false);
        history.record_scan(&pyoderma, true);

        assert_eq!(history.total_scans, 3);
        assert_eq!(history.total_positive, 2);
        assert_eq!(history.records.len(), 3);
        assert_eq!(history.records[1].class, "Healthy");
        assert!(!history.records[1].positive);
    }
}
