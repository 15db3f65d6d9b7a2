//! Configuration Module
//!
//! YAML configuration for both process roles. Every field has a default, so a file
//! only needs to name what differs from a local single-machine setup.
//!
//! ## Submodules
//! - **`types`**: `CoordinatorConfig` and `WorkerConfig` with their sections.

pub mod types;

pub use types::{
    ComputationConfig, CoordinatorConfig, CoordinatorServer, DatasetConfig, WorkerConfig,
    WorkerServer,
};

use crate::error::{RecommenderError, Result};

use serde::de::DeserializeOwned;
use std::path::Path;

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        RecommenderError::Config(format!("cannot read {}: {}", path.display(), e))
    })?;
    Ok(serde_yaml::from_str(&content)?)
}

impl CoordinatorConfig {
    /// Reads and validates a coordinator config file.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = read_yaml(path)?;
        config.validate()?;
        tracing::debug!("Loaded coordinator config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dataset.partitions == 0 {
            return Err(RecommenderError::Config(
                "dataset.partitions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl WorkerConfig {
    /// Reads and validates a worker config file.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = read_yaml(path)?;
        config.validate()?;
        tracing::debug!("Loaded worker config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.computation.threshold.is_finite() {
            return Err(RecommenderError::Config(format!(
                "computation.threshold must be a finite number, got {}",
                self.computation.threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
