use serde::Serialize;

use crate::models::record::DocumentRecord;

/// An ordered collection of parsed documents, one row per document in
/// file-then-document order. Built once per load, read-only afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Corpus {
    pub records: Vec<DocumentRecord>,
}

impl Corpus {
    /// Column names of the tabular view, in record-field order.
    pub const COLUMNS: [&'static str; 16] = [
        "old_id",
        "new_id",
        "has_topics",
        "date",
        "topics",
        "places",
        "people",
        "orgs",
        "exchanges",
        "companies",
        "title",
        "dateline",
        "body",
        "author",
        "cgi_split",
        "lewis_split",
    ];

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
