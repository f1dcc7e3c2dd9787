use std::collections::HashMap;

use ndarray::Array2;

use crate::features::tokenizer::Tokenizer;

/// TF-IDF document-term matrix with the tokenizer's fixed column width.
///
/// Weighting is log-scaled term frequency times smoothed inverse
/// document frequency: `(1 + ln tf) * ln(1 + n / (1 + df))`. Words
/// outside the vocabulary contribute nothing.
#[must_use]
pub fn tfidf_matrix(tokenizer: &Tokenizer, texts: &[String]) -> Array2<f32> {
    let n_docs = tokenizer.document_count() as f32;
    let mut matrix = Array2::zeros((texts.len(), tokenizer.vocab_size()));
    for (row, text) in texts.iter().enumerate() {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for token in Tokenizer::tokenize(text) {
            if let Some(index) = tokenizer.index_of(&token) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }
        for (index, count) in counts {
            let tf = 1.0 + (count as f32).ln();
            let idf = (1.0 + n_docs / (1.0 + tokenizer.doc_freq(index) as f32)).ln();
            matrix[[row, index]] = tf * idf;
        }
    }
    matrix
}
