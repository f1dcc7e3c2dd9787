use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::curator::CuratorConfig;
use crate::error::{NewswireError, Result};
use crate::ml::trainer::TrainConfig;

/// Config filename looked up in the working directory.
const CONFIG_FILE: &str = "newswire.toml";

/// User-tunable settings, all optional in the file. CLI flags override
/// whatever the file provides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dataset: DatasetSettings,
    pub features: FeatureSettings,
    pub model: ModelSettings,
}

/// Curation-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Topics rarer than this (corpus-wide) are dropped with their rows.
    pub min_topic_count: usize,
    /// Head rows of the train matrix held out for validation.
    pub validation_rows: usize,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            min_topic_count: 100,
            validation_rows: 1000,
        }
    }
}

/// Feature-encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSettings {
    /// Vocabulary cap; also the feature-matrix width.
    pub vocab_size: usize,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self { vocab_size: 10_000 }
    }
}

/// Classifier and training-loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub hidden_dim: usize,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f32,
    pub seed: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            hidden_dim: 64,
            epochs: 20,
            batch_size: 512,
            learning_rate: 1e-3,
            seed: 42,
        }
    }
}

impl Settings {
    /// Load `newswire.toml` from `dir` when present, defaults otherwise.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        toml::from_str(&raw).map_err(|e| NewswireError::Config(format!("{}: {e}", path.display())))
    }

    /// Load from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        Self::load(Path::new("."))
    }

    #[must_use]
    pub fn curator(&self) -> CuratorConfig {
        CuratorConfig {
            min_topic_count: self.dataset.min_topic_count,
        }
    }

    #[must_use]
    pub fn trainer(&self) -> TrainConfig {
        TrainConfig {
            epochs: self.model.epochs,
            batch_size: self.model.batch_size,
            learning_rate: self.model.learning_rate,
            validation_rows: self.dataset.validation_rows,
            seed: self.model.seed,
        }
    }
}
