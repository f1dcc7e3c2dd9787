pub mod tokenizer;
pub mod vectorizer;

pub use tokenizer::Tokenizer;

use crate::models::record::DocumentRecord;

/// Title and body joined into the single text the feature matrix
/// consumes.
#[must_use]
pub fn assemble_text(record: &DocumentRecord) -> String {
    format!("{} {}", record.title, record.body)
}
