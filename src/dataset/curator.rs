use std::collections::{BTreeSet, HashMap};

use ndarray::Array2;

use crate::error::{NewswireError, Result};
use crate::models::corpus::Corpus;
use crate::models::record::DocumentRecord;

/// Lewis partition value for documents excluded from both splits.
const NOT_USED: &str = "NOT-USED";

/// Filtering knobs for dataset curation.
#[derive(Debug, Clone)]
pub struct CuratorConfig {
    /// Topics with at most this many corpus-wide occurrences are dropped,
    /// along with their rows.
    pub min_topic_count: usize,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            min_topic_count: 100,
        }
    }
}

/// One partition of the curated dataset. `labels` is index-aligned with
/// `records`.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub records: Vec<DocumentRecord>,
    pub labels: Vec<usize>,
}

impl Partition {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Filtered, split, and label-encoded view of a corpus.
#[derive(Debug, Clone)]
pub struct CuratedDataset {
    pub train: Partition,
    pub test: Partition,
    /// Surviving topics in lexicographic order; a topic's position is its
    /// label index.
    pub label_names: Vec<String>,
    /// Rows removed by filtering.
    pub dropped: usize,
}

impl CuratedDataset {
    /// Row count per topic across both partitions, in label order.
    #[must_use]
    pub fn topic_counts(&self) -> Vec<(String, usize)> {
        let mut counts = vec![0usize; self.label_names.len()];
        for &label in self.train.labels.iter().chain(self.test.labels.iter()) {
            counts[label] += 1;
        }
        self.label_names.iter().cloned().zip(counts).collect()
    }
}

/// Filter unusable rows, split by Lewis partition, and assign stable
/// label indices.
///
/// Rows are dropped when excluded from both partitions, when they carry
/// no topic, or when their topic is too rare to learn. Topic frequencies
/// are counted over the whole corpus before any filtering.
pub fn curate(corpus: &Corpus, config: &CuratorConfig) -> Result<CuratedDataset> {
    let mut topic_counts: HashMap<&str, usize> = HashMap::new();
    for record in &corpus.records {
        *topic_counts.entry(record.topics.as_str()).or_insert(0) += 1;
    }

    let kept: Vec<&DocumentRecord> = corpus
        .records
        .iter()
        .filter(|r| {
            r.lewis_split != NOT_USED
                && !r.topics.is_empty()
                && topic_counts[r.topics.as_str()] > config.min_topic_count
        })
        .collect();
    let dropped = corpus.len() - kept.len();

    // Lexicographic label order keeps the mapping stable across runs.
    let names: BTreeSet<&str> = kept.iter().map(|r| r.topics.as_str()).collect();
    let label_names: Vec<String> = names.iter().map(|t| (*t).to_string()).collect();
    let index: HashMap<&str, usize> = names
        .into_iter()
        .enumerate()
        .map(|(i, t)| (t, i))
        .collect();

    let mut train = Partition::default();
    let mut test = Partition::default();
    for record in kept {
        let label = index[record.topics.as_str()];
        match record.lewis_split.as_str() {
            "TRAIN" => {
                train.records.push(record.clone());
                train.labels.push(label);
            }
            "TEST" => {
                test.records.push(record.clone());
                test.labels.push(label);
            }
            // Rows assigned to neither partition fall out of the dataset.
            _ => {}
        }
    }

    if train.is_empty() {
        return Err(NewswireError::EmptyDataset(
            "no TRAIN rows survived filtering".into(),
        ));
    }
    if test.is_empty() {
        return Err(NewswireError::EmptyDataset(
            "no TEST rows survived filtering".into(),
        ));
    }

    tracing::info!(
        "curated {} train / {} test rows across {} topics ({} dropped)",
        train.len(),
        test.len(),
        label_names.len(),
        dropped
    );
    Ok(CuratedDataset {
        train,
        test,
        label_names,
        dropped,
    })
}

/// One-hot encode labels into a `(rows, classes)` matrix.
#[must_use]
pub fn one_hot(labels: &[usize], classes: usize) -> Array2<f32> {
    let mut matrix = Array2::zeros((labels.len(), classes));
    for (row, &class) in labels.iter().enumerate() {
        matrix[[row, class]] = 1.0;
    }
    matrix
}
