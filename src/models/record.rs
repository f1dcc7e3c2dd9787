use chrono::NaiveDateTime;
use serde::Serialize;

/// One parsed Reuters-21578 document.
///
/// Every field is always populated: attributes and tags missing from the
/// source default to an empty string (`false` for the topics flag, `None`
/// for the date), so a collection of records is uniformly tabular.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentRecord {
    /// `OLDID` header attribute.
    pub old_id: String,
    /// `NEWID` header attribute.
    pub new_id: String,
    /// Whether the `TOPICS` header attribute carried a non-empty value.
    pub has_topics: bool,
    /// Timestamp extracted from `<DATE>`, when one could be recovered.
    pub date: Option<NaiveDateTime>,
    pub topics: String,
    pub places: String,
    pub people: String,
    pub orgs: String,
    pub exchanges: String,
    pub companies: String,
    pub title: String,
    pub dateline: String,
    pub body: String,
    pub author: String,
    /// `CGISPLIT` header attribute.
    pub cgi_split: String,
    /// `LEWISSPLIT` header attribute (TRAIN / TEST / NOT-USED).
    pub lewis_split: String,
}
