use serde::Serialize;

/// Everything the parser had to recover from, collected as a value and
/// returned alongside the parse result. Callers decide what to do with
/// it; the loader reports it through the log at the end of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    /// Files that needed the lossy per-line decode fallback.
    pub lossy_decodes: usize,
    /// Numeric character references (`&#…;`) stripped before parsing.
    pub stripped_refs: usize,
    /// Raw `<DATE>` contents that matched no known timestamp pattern.
    pub date_anomalies: Vec<String>,
    /// Structurally malformed fragments that were skipped, with reasons.
    pub skipped_fragments: Vec<String>,
}

impl Diagnostics {
    /// Fold another collector into this one.
    pub fn merge(&mut self, other: Diagnostics) {
        self.lossy_decodes += other.lossy_decodes;
        self.stripped_refs += other.stripped_refs;
        self.date_anomalies.extend(other.date_anomalies);
        self.skipped_fragments.extend(other.skipped_fragments);
    }

    /// True when nothing had to be recovered.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.lossy_decodes == 0
            && self.stripped_refs == 0
            && self.date_anomalies.is_empty()
            && self.skipped_fragments.is_empty()
    }
}
