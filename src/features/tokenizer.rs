use std::collections::{HashMap, HashSet};

/// Punctuation stripped before whitespace tokenization.
const FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Word tokenizer with a frequency-capped vocabulary.
///
/// Index 0 is reserved; real words occupy `1..num_words`, most frequent
/// first. Frequency ties break lexicographically so fitting the same
/// corpus twice yields the same index.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    num_words: usize,
    word_index: HashMap<String, usize>,
    document_count: usize,
    /// Per-index count of documents containing the word at least once.
    doc_freq: Vec<usize>,
}

impl Tokenizer {
    #[must_use]
    pub fn new(num_words: usize) -> Self {
        Self {
            num_words,
            word_index: HashMap::new(),
            document_count: 0,
            doc_freq: vec![0; num_words],
        }
    }

    /// Lowercase, strip punctuation, split on whitespace.
    #[must_use]
    pub fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .chars()
            .map(|c| if FILTERS.contains(c) { ' ' } else { c })
            .collect::<String>()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Build the vocabulary from a corpus of texts, keeping the
    /// `num_words - 1` most frequent words.
    pub fn fit(&mut self, texts: &[String]) {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut docs_with: HashMap<String, usize> = HashMap::new();
        for text in texts {
            let mut seen: HashSet<String> = HashSet::new();
            for token in Self::tokenize(text) {
                *counts.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.clone()) {
                    *docs_with.entry(token).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        self.document_count = texts.len();
        self.word_index.clear();
        self.doc_freq = vec![0; self.num_words];
        let capacity = self.num_words.saturating_sub(1);
        for (rank, (word, _)) in ranked.into_iter().take(capacity).enumerate() {
            let index = rank + 1;
            self.doc_freq[index] = docs_with.get(&word).copied().unwrap_or(0);
            self.word_index.insert(word, index);
        }
    }

    /// Column index of a word, or `None` when outside the vocabulary.
    #[must_use]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.word_index.get(word).copied()
    }

    /// Fixed feature width (the vocabulary cap, index 0 included).
    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.num_words
    }

    /// Number of distinct words actually indexed.
    #[must_use]
    pub fn indexed_words(&self) -> usize {
        self.word_index.len()
    }

    /// Documents seen during `fit`.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Documents containing the word at the given index.
    #[must_use]
    pub fn doc_freq(&self, index: usize) -> usize {
        self.doc_freq.get(index).copied().unwrap_or(0)
    }
}
