use std::fs::File;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::PartitionError;

pub(crate) const DEFAULT_CUT_K: usize = 2;

pub(crate) const DEFAULT_MIN_CLIQUE_SIZE: usize = 1;

pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

/// Parameters of a [`Partitioner`](crate::partitioner::Partitioner).
///
/// ```yaml
/// seed: 42           # contraction RNG seed, entropy when absent
/// cut_k: 3
/// community_k: 0     # 0: peel until no edge is left
/// min_clique_size: 2
/// log_level: debug
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    pub seed: Option<u64>,
    pub cut_k: usize,
    pub community_k: usize,
    pub min_clique_size: usize,
    pub log_level: String,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        PartitionConfig {
            seed: None,
            cut_k: DEFAULT_CUT_K,
            community_k: 0,
            min_clique_size: DEFAULT_MIN_CLIQUE_SIZE,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl PartitionConfig {
    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let config: PartitionConfig =
            serde_yaml::from_str(text).context("failed to parse partition config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        let config: PartitionConfig = serde_yaml::from_reader(file)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values no entry point accepts.
    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.cut_k < 2 {
            return Err(PartitionError::Config(format!(
                "cut_k must be at least 2, got {}",
                self.cut_k
            )));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(PartitionError::Config(format!(
                "unknown log level {:?}",
                self.log_level
            )));
        }
        Ok(())
    }
}
