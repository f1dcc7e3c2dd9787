use regex::Regex;

/// Recovers `<REUTERS>…</REUTERS>` document fragments from the raw text
/// of a corpus file.
///
/// Boundaries are textual, not a parse tree: the corpus nests at a fixed,
/// known depth, so delimiter matching is sufficient and far more robust
/// against the format's quirks than a grammar would be.
pub struct DocumentExtractor {
    char_ref: Regex,
    document: Regex,
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            char_ref: Regex::new(r"&#\d*;").expect("char ref pattern"),
            document: Regex::new(r"(?s)<REUTERS.*?</REUTERS>").expect("document pattern"),
        }
    }

    /// Strip the malformed numeric character references that break
    /// structural parsing. Returns the cleaned text and how many
    /// references were removed.
    #[must_use]
    pub fn clean(&self, text: &str) -> (String, usize) {
        let count = self.char_ref.find_iter(text).count();
        if count == 0 {
            return (text.to_string(), 0);
        }
        (self.char_ref.replace_all(text, "").into_owned(), count)
    }

    /// All non-overlapping document fragments, in file order. A file with
    /// no documents yields an empty list, not an error.
    #[must_use]
    pub fn fragments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.document.find_iter(text).map(|m| m.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_numeric_char_refs_of_any_digit_count() {
        let extractor = DocumentExtractor::new();
        let (cleaned, count) = extractor.clean("Price &#5;is &#123;high&#12;");
        assert_eq!(cleaned, "Price is high");
        assert_eq!(count, 3);
    }

    #[test]
    fn clean_text_passes_through() {
        let extractor = DocumentExtractor::new();
        let (cleaned, count) = extractor.clean("no references here");
        assert_eq!(cleaned, "no references here");
        assert_eq!(count, 0);
    }

    #[test]
    fn fragments_span_newlines() {
        let extractor = DocumentExtractor::new();
        let text = "noise\n<REUTERS NEWID=\"1\">\nline one\nline two\n</REUTERS>\ntrailing";
        let fragments = extractor.fragments(text);
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].starts_with("<REUTERS"));
        assert!(fragments[0].ends_with("</REUTERS>"));
        assert!(fragments[0].contains("line two"));
    }

    #[test]
    fn multiple_fragments_preserve_order() {
        let extractor = DocumentExtractor::new();
        let text = "<REUTERS NEWID=\"1\">a</REUTERS><REUTERS NEWID=\"2\">b</REUTERS>";
        let fragments = extractor.fragments(text);
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].contains("\"1\""));
        assert!(fragments[1].contains("\"2\""));
    }

    #[test]
    fn no_documents_yields_empty_list() {
        let extractor = DocumentExtractor::new();
        assert!(extractor.fragments("just some prose").is_empty());
    }
}
