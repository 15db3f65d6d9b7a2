use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::recommend::DEFAULT_THRESHOLD;

/// Settings for the coordinator process.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoordinatorConfig {
    #[serde(default)]
    pub server: CoordinatorServer,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoordinatorServer {
    /// Address workers connect to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Address of the HTTP query endpoint.
    #[serde(default = "default_query_bind")]
    pub query_bind: String,

    /// How long the coordinator keeps accepting workers.
    #[serde(with = "humantime_serde", default = "default_accept_timeout")]
    pub accept_timeout: Duration,

    /// Upper bound on one offer/result exchange.
    #[serde(with = "humantime_serde", default = "default_session_timeout")]
    pub session_timeout: Duration,
}

impl Default for CoordinatorServer {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            query_bind: default_query_bind(),
            accept_timeout: default_accept_timeout(),
            session_timeout: default_session_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,

    #[serde(default = "default_partitions")]
    pub partitions: usize,

    /// Shuffle the reviews with this seed before partitioning.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            partitions: default_partitions(),
            shuffle_seed: None,
        }
    }
}

/// Settings for a worker process.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkerConfig {
    #[serde(default)]
    pub server: WorkerServer,
    #[serde(default)]
    pub computation: ComputationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkerServer {
    /// Coordinator address.
    #[serde(default = "default_server_address")]
    pub address: String,

    #[serde(with = "humantime_serde", default = "default_connect_timeout")]
    pub connect_timeout: Duration,
}

impl Default for WorkerServer {
    fn default() -> Self {
        Self {
            address: default_server_address(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComputationConfig {
    /// Minimum predicted rating for a product to be recommended.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for ComputationConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:9000".to_string()
}

fn default_query_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_accept_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_session_timeout() -> Duration {
    Duration::from_secs(120)
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/sample_reviews.csv")
}

fn default_partitions() -> usize {
    4
}

fn default_server_address() -> String {
    "127.0.0.1:9000".to_string()
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}
