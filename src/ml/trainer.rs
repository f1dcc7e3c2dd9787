use ndarray::{s, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::error::{NewswireError, Result};
use crate::ml::model::Classifier;
use crate::ml::optimizer::RmsProp;

/// Knobs for the training loop.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f32,
    /// Head rows of the training matrix held out for validation.
    pub validation_rows: usize,
    /// Seed for batch shuffling.
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 20,
            batch_size: 512,
            learning_rate: 1e-3,
            validation_rows: 1000,
            seed: 42,
        }
    }
}

/// Metrics captured after each epoch.
#[derive(Debug, Clone, Serialize)]
pub struct EpochMetrics {
    pub epoch: usize,
    pub train_loss: f32,
    pub val_loss: f32,
    pub val_accuracy: f32,
}

/// Train `model` on `(x, y)` for a fixed epoch budget with shuffled
/// mini-batches, holding out the head of the matrix for validation.
///
/// When the dataset is too small for the configured holdout, the slice
/// shrinks to at most half the rows; with no validation rows at all the
/// validation metrics fall back to the training slice.
pub fn train(
    model: &mut Classifier,
    x: ArrayView2<f32>,
    y: ArrayView2<f32>,
    config: &TrainConfig,
) -> Result<Vec<EpochMetrics>> {
    let rows = x.nrows();
    if rows == 0 {
        return Err(NewswireError::EmptyDataset("no training rows".into()));
    }

    let val_rows = config.validation_rows.min(rows / 2);
    let x_val = x.slice(s![..val_rows, ..]);
    let y_val = y.slice(s![..val_rows, ..]);
    let x_train = x.slice(s![val_rows.., ..]);
    let y_train = y.slice(s![val_rows.., ..]);

    let opt = RmsProp::new(config.learning_rate);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut indices: Vec<usize> = (0..x_train.nrows()).collect();
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        indices.shuffle(&mut rng);
        let mut total_loss = 0.0_f32;
        let mut batches = 0usize;
        for batch in indices.chunks(config.batch_size.max(1)) {
            let xb = x_train.select(Axis(0), batch);
            let yb = y_train.select(Axis(0), batch);
            total_loss += model.train_batch(xb.view(), yb.view(), &opt);
            batches += 1;
        }
        let train_loss = total_loss / batches.max(1) as f32;

        let (val_loss, val_accuracy) = if val_rows > 0 {
            model.evaluate(x_val, y_val)
        } else {
            model.evaluate(x_train, y_train)
        };
        tracing::info!(
            "epoch {epoch}/{}: loss {train_loss:.4}, val_loss {val_loss:.4}, val_acc {val_accuracy:.3}",
            config.epochs
        );
        history.push(EpochMetrics {
            epoch,
            train_loss,
            val_loss,
            val_accuracy,
        });
    }
    Ok(history)
}
