use std::path::Path;

use serde::Serialize;

use crate::config::Settings;
use crate::corpus::diagnostics::Diagnostics;
use crate::corpus::loader::CorpusLoader;
use crate::dataset::curator::{self, CuratedDataset};
use crate::error::Result;
use crate::features::{self, tokenizer::Tokenizer, vectorizer};
use crate::ml::model::{Classifier, ClassifierConfig};
use crate::ml::trainer::{self, EpochMetrics};

/// Final report of an end-to-end training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainReport {
    pub documents: usize,
    pub dropped: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub classes: usize,
    pub vocabulary: usize,
    pub history: Vec<EpochMetrics>,
    pub test_loss: f32,
    pub test_accuracy: f32,
    pub diagnostics: Diagnostics,
}

/// Load, curate, featurize, train, and evaluate in one pass.
pub fn run_training(dir: &Path, settings: &Settings) -> Result<TrainReport> {
    let loaded = CorpusLoader::new().load_dir(dir)?;
    let documents = loaded.corpus.len();
    let dataset = curator::curate(&loaded.corpus, &settings.curator())?;

    let (tokenizer, x_train, x_test) = featurize(&dataset, settings.features.vocab_size);
    let classes = dataset.label_names.len();
    let y_train = curator::one_hot(&dataset.train.labels, classes);
    let y_test = curator::one_hot(&dataset.test.labels, classes);

    let mut model = Classifier::new(&ClassifierConfig {
        input_dim: tokenizer.vocab_size(),
        hidden_dim: settings.model.hidden_dim,
        classes,
        seed: settings.model.seed,
    });
    tracing::info!(
        "training on {} rows ({} classes, {} feature columns)",
        dataset.train.len(),
        classes,
        tokenizer.vocab_size()
    );
    let history = trainer::train(&mut model, x_train.view(), y_train.view(), &settings.trainer())?;

    let (test_loss, test_accuracy) = model.evaluate(x_test.view(), y_test.view());
    tracing::info!("test loss {test_loss:.4}, accuracy {test_accuracy:.3}");

    Ok(TrainReport {
        documents,
        dropped: dataset.dropped,
        train_rows: dataset.train.len(),
        test_rows: dataset.test.len(),
        classes,
        vocabulary: tokenizer.indexed_words(),
        history,
        test_loss,
        test_accuracy,
        diagnostics: loaded.diagnostics,
    })
}

/// Fit the tokenizer jointly over both splits and encode each split.
fn featurize(
    dataset: &CuratedDataset,
    vocab_size: usize,
) -> (Tokenizer, ndarray::Array2<f32>, ndarray::Array2<f32>) {
    let train_texts: Vec<String> = dataset.train.records.iter().map(features::assemble_text).collect();
    let test_texts: Vec<String> = dataset.test.records.iter().map(features::assemble_text).collect();

    let mut all_texts = train_texts.clone();
    all_texts.extend(test_texts.iter().cloned());
    let mut tokenizer = Tokenizer::new(vocab_size);
    tokenizer.fit(&all_texts);

    let x_train = vectorizer::tfidf_matrix(&tokenizer, &train_texts);
    let x_test = vectorizer::tfidf_matrix(&tokenizer, &test_texts);
    (tokenizer, x_train, x_test)
}
