//! Configuration for the dashboard data engine.
//!
//! Holds the location of the data directory and the static dataset
//! attribution record exposed to the presentation layer. Attribution is
//! configuration, never derived from the input file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::app::models::DatasetInfo;
use crate::constants::{DATASET_NAME, DATASET_URL, DEFAULT_DATA_DIR};

/// Global configuration for a dashboard session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Directory searched for the single input CSV file
    pub data_dir: PathBuf,

    /// Static attribution record for the loaded dataset
    pub dataset: DatasetInfo,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            dataset: DatasetInfo {
                name: DATASET_NAME.to_string(),
                url: DATASET_URL.to_string(),
            },
        }
    }
}

impl DashboardConfig {
    /// Create configuration with a custom data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Create configuration with custom dataset attribution
    pub fn with_dataset(mut self, dataset: DatasetInfo) -> Self {
        self.dataset = dataset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_data_directory() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.dataset.name, DATASET_NAME);
        assert_eq!(config.dataset.url, DATASET_URL);
    }

    #[test]
    fn builder_overrides_data_dir() {
        let config = DashboardConfig::default().with_data_dir("/tmp/climate");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/climate"));
    }
}
