use chrono::NaiveDateTime;
use regex::Regex;
use thiserror::Error;

use crate::corpus::diagnostics::Diagnostics;
use crate::corpus::extractor::DocumentExtractor;
use crate::models::record::DocumentRecord;

/// Timestamp pattern embedded in `<DATE>` text, e.g.
/// `5-MAR-1987 10:23:01.123`. The surrounding tag text often carries
/// junk, so the timestamp is located by pattern before parsing.
const DATE_PATTERN: &str = r"[0-9]+-[A-Z]{3}-[0-9]{4} *[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]+";
const DATE_FORMAT: &str = "%d-%b-%Y %H:%M:%S%.f";

/// Why a single fragment could not be turned into a record. Fragment
/// errors never abort a file; the offending document is skipped.
#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("missing <{0}> element")]
    MissingElement(&'static str),

    #[error("<{0}> has content but no <D> items")]
    MalformedList(&'static str),
}

/// A tag span inside a fragment: raw attribute text plus inner content.
///
/// Not a parse tree. Lookups scan for the first occurrence of a tag and
/// slice out its content, which is all the fixed Reuters tag vocabulary
/// needs. Absent tags are an `Option`, never a sentinel.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    attrs: &'a str,
    inner: &'a str,
}

impl<'a> Element<'a> {
    /// Find the first `<tag …>…</tag>` span in `source`.
    #[must_use]
    pub fn find_in(source: &'a str, tag: &str) -> Option<Element<'a>> {
        let open = format!("<{tag}");
        let mut from = 0;
        while let Some(rel) = source[from..].find(&open) {
            let name_end = from + rel + open.len();
            // Reject prefix hits, e.g. `<DATELINE` when looking for DATE.
            match source.as_bytes().get(name_end) {
                Some(b'>' | b' ' | b'\t' | b'\r' | b'\n') => {}
                _ => {
                    from = name_end;
                    continue;
                }
            }
            let gt = name_end + source[name_end..].find('>')?;
            let close = format!("</{tag}>");
            let end = gt + 1 + source[gt + 1..].find(&close)?;
            return Some(Element {
                attrs: &source[name_end..gt],
                inner: &source[gt + 1..end],
            });
        }
        None
    }

    /// First child element with the given tag, or `None` when absent.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<Element<'a>> {
        Element::find_in(self.inner, tag)
    }

    /// Attribute value by exact key, or `None`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        let bytes = self.attrs.as_bytes();
        let mut from = 0;
        while let Some(rel) = self.attrs[from..].find(name) {
            let start = from + rel;
            let end = start + name.len();
            let bounded = start == 0 || bytes[start - 1].is_ascii_whitespace();
            let rest = self.attrs[end..].trim_start();
            if bounded {
                if let Some(value) = rest.strip_prefix('=') {
                    if let Some(quoted) = value.trim_start().strip_prefix('"') {
                        return quoted.find('"').map(|q| &quoted[..q]);
                    }
                }
            }
            from = end;
        }
        None
    }

    /// Trimmed, entity-decoded text content.
    #[must_use]
    pub fn text(&self) -> String {
        unescape(self.inner.trim())
    }
}

/// Decode the named SGML entities the corpus uses.
fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Result of parsing one file's worth of text.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub records: Vec<DocumentRecord>,
    pub diagnostics: Diagnostics,
}

/// Parser for the Reuters-21578 SGML format.
///
/// Document boundaries are recovered textually over the cleaned file,
/// then each fragment is sliced into its known child elements. Per-field
/// recovery rules keep every record fully populated.
pub struct SgmlParser {
    extractor: DocumentExtractor,
    date: Regex,
}

impl Default for SgmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SgmlParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractor: DocumentExtractor::new(),
            date: Regex::new(DATE_PATTERN).expect("date pattern"),
        }
    }

    /// Parse the full text of one corpus file.
    ///
    /// Malformed character references are stripped up front; fragments
    /// that fail structural parsing are skipped and recorded so the rest
    /// of the file still contributes rows.
    #[must_use]
    pub fn parse_str(&self, raw: &str) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();
        let (cleaned, stripped) = self.extractor.clean(raw);
        outcome.diagnostics.stripped_refs = stripped;

        for (index, fragment) in self.extractor.fragments(&cleaned).iter().enumerate() {
            match self.parse_fragment(fragment, &mut outcome.diagnostics) {
                Ok(record) => outcome.records.push(record),
                Err(err) => {
                    tracing::warn!("skipping document {index}: {err}");
                    outcome
                        .diagnostics
                        .skipped_fragments
                        .push(format!("document {index}: {err}"));
                }
            }
        }
        outcome
    }

    /// Parse one `<REUTERS>` fragment into a record.
    fn parse_fragment(
        &self,
        fragment: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<DocumentRecord, FragmentError> {
        let doc =
            Element::find_in(fragment, "REUTERS").ok_or(FragmentError::MissingElement("REUTERS"))?;
        let text = doc.child("TEXT").ok_or(FragmentError::MissingElement("TEXT"))?;

        Ok(DocumentRecord {
            old_id: doc.attr("OLDID").unwrap_or_default().to_string(),
            new_id: doc.attr("NEWID").unwrap_or_default().to_string(),
            has_topics: doc.attr("TOPICS").is_some_and(|v| !v.is_empty()),
            cgi_split: doc.attr("CGISPLIT").unwrap_or_default().to_string(),
            lewis_split: doc.attr("LEWISSPLIT").unwrap_or_default().to_string(),
            date: self.date_of(&doc, diagnostics),
            topics: list_text(&doc, "TOPICS")?,
            places: list_text(&doc, "PLACES")?,
            people: list_text(&doc, "PEOPLE")?,
            orgs: list_text(&doc, "ORGS")?,
            exchanges: list_text(&doc, "EXCHANGES")?,
            companies: list_text(&doc, "COMPANIES")?,
            title: plain_text(&text, "TITLE"),
            dateline: plain_text(&text, "DATELINE"),
            body: plain_text(&text, "BODY"),
            author: plain_text(&text, "AUTHOR"),
        })
    }

    /// Timestamp from `<DATE>`, or `None` when absent or unparseable.
    /// Unparseable dates are an anomaly, not an error.
    fn date_of(&self, doc: &Element, diagnostics: &mut Diagnostics) -> Option<NaiveDateTime> {
        let raw = doc.child("DATE")?.text();
        let Some(matched) = self.date.find(&raw) else {
            tracing::warn!("cannot find date pattern in: {raw}");
            diagnostics.date_anomalies.push(raw.clone());
            return None;
        };
        match NaiveDateTime::parse_from_str(matched.as_str(), DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::warn!("cannot parse date {:?}: {err}", matched.as_str());
                diagnostics.date_anomalies.push(raw.clone());
                None
            }
        }
    }
}

/// Text of a taxonomy tag: the first `<D>` item, or `""` when the tag is
/// absent or empty. A non-empty list without `<D>` items is structural
/// damage and fails the fragment.
fn list_text(doc: &Element, tag: &'static str) -> Result<String, FragmentError> {
    let Some(elem) = doc.child(tag) else {
        return Ok(String::new());
    };
    if elem.inner.trim().is_empty() {
        return Ok(String::new());
    }
    match elem.child("D") {
        Some(d) => Ok(d.text()),
        None => Err(FragmentError::MalformedList(tag)),
    }
}

/// Text of a plain child tag, or `""` when absent.
fn plain_text(parent: &Element, tag: &str) -> String {
    parent.child(tag).map(|e| e.text()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const DOC: &str = r#"<REUTERS TOPICS="YES" LEWISSPLIT="TRAIN" CGISPLIT="TRAINING-SET" OLDID="5544" NEWID="1">
<DATE> 5-MAR-1987 10:23:01.123</DATE>
<TOPICS><D>grain</D><D>wheat</D></TOPICS>
<PLACES><D>usa</D></PLACES>
<PEOPLE></PEOPLE>
<ORGS></ORGS>
<EXCHANGES></EXCHANGES>
<COMPANIES></COMPANIES>
<TEXT>
<TITLE>GRAIN PRICES RISE</TITLE>
<DATELINE>CHICAGO, March 5 -</DATELINE>
<BODY>Grain futures rose sharply today.
Traders cited weather concerns.
Reuter</BODY>
</TEXT>
</REUTERS>"#;

    fn parse_one(fragment: &str) -> (DocumentRecord, Diagnostics) {
        let outcome = SgmlParser::new().parse_str(fragment);
        assert_eq!(outcome.records.len(), 1, "expected exactly one record");
        let mut records = outcome.records;
        (records.remove(0), outcome.diagnostics)
    }

    #[test]
    fn parses_header_attributes() {
        let (record, _) = parse_one(DOC);
        assert_eq!(record.old_id, "5544");
        assert_eq!(record.new_id, "1");
        assert!(record.has_topics);
        assert_eq!(record.cgi_split, "TRAINING-SET");
        assert_eq!(record.lewis_split, "TRAIN");
    }

    #[test]
    fn parses_date_with_surrounding_whitespace() {
        let (record, diagnostics) = parse_one(DOC);
        let expected = NaiveDate::from_ymd_opt(1987, 3, 5)
            .unwrap()
            .and_hms_micro_opt(10, 23, 1, 123_000)
            .unwrap();
        assert_eq!(record.date, Some(expected));
        assert!(diagnostics.date_anomalies.is_empty());
    }

    #[test]
    fn taxonomy_descent_reads_the_first_d_item() {
        let (record, _) = parse_one(DOC);
        assert_eq!(record.topics, "grain");
        assert_eq!(record.places, "usa");
    }

    #[test]
    fn empty_taxonomy_tags_resolve_to_empty_strings() {
        let (record, _) = parse_one(DOC);
        assert_eq!(record.people, "");
        assert_eq!(record.orgs, "");
        assert_eq!(record.exchanges, "");
        assert_eq!(record.companies, "");
    }

    #[test]
    fn parses_text_container_fields() {
        let (record, _) = parse_one(DOC);
        assert_eq!(record.title, "GRAIN PRICES RISE");
        assert_eq!(record.dateline, "CHICAGO, March 5 -");
        assert!(record.body.starts_with("Grain futures rose"));
        assert!(record.body.ends_with("Reuter"));
        assert_eq!(record.author, "");
    }

    #[test]
    fn missing_newid_defaults_to_empty() {
        let doc = r#"<REUTERS TOPICS="YES" LEWISSPLIT="TRAIN"><DATE>1-JAN-1987 00:00:00.0</DATE><TEXT><TITLE>T</TITLE></TEXT></REUTERS>"#;
        let (record, _) = parse_one(doc);
        assert_eq!(record.new_id, "");
        assert_eq!(record.old_id, "");
    }

    #[test]
    fn absent_topics_attribute_means_no_topics() {
        let doc = r#"<REUTERS LEWISSPLIT="TEST"><TEXT></TEXT></REUTERS>"#;
        let (record, _) = parse_one(doc);
        assert!(!record.has_topics);
    }

    #[test]
    fn any_non_empty_topics_attribute_counts_as_flagged() {
        // The corpus marks TOPICS="NO" on some documents; the flag tracks
        // attribute truthiness, not agreement with the topic list.
        let doc = r#"<REUTERS TOPICS="NO" LEWISSPLIT="TEST"><TEXT></TEXT></REUTERS>"#;
        let (record, _) = parse_one(doc);
        assert!(record.has_topics);
    }

    #[test]
    fn unmatchable_date_degrades_to_none_with_anomaly() {
        let doc = r#"<REUTERS NEWID="9"><DATE>unknown</DATE><TEXT></TEXT></REUTERS>"#;
        let (record, diagnostics) = parse_one(doc);
        assert!(record.date.is_none());
        assert_eq!(diagnostics.date_anomalies, vec!["unknown".to_string()]);
    }

    #[test]
    fn missing_date_is_none_without_anomaly() {
        let doc = r#"<REUTERS NEWID="9"><TEXT></TEXT></REUTERS>"#;
        let (record, diagnostics) = parse_one(doc);
        assert!(record.date.is_none());
        assert!(diagnostics.date_anomalies.is_empty());
    }

    #[test]
    fn date_is_extracted_from_surrounding_junk() {
        let doc = r#"<REUTERS NEWID="9"><DATE>   ***26-FEB-1987 15:01:01.79 garbage</DATE><TEXT></TEXT></REUTERS>"#;
        let (record, _) = parse_one(doc);
        let expected = NaiveDate::from_ymd_opt(1987, 2, 26)
            .unwrap()
            .and_hms_micro_opt(15, 1, 1, 790_000)
            .unwrap();
        assert_eq!(record.date, Some(expected));
    }

    #[test]
    fn fragment_without_text_container_is_skipped() {
        let text = r#"<REUTERS NEWID="1"><TEXT><TITLE>ok</TITLE></TEXT></REUTERS>
<REUTERS NEWID="2"><DATE>1-JAN-1987 00:00:00.0</DATE></REUTERS>
<REUTERS NEWID="3"><TEXT><TITLE>also ok</TITLE></TEXT></REUTERS>"#;
        let outcome = SgmlParser::new().parse_str(text);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].new_id, "1");
        assert_eq!(outcome.records[1].new_id, "3");
        assert_eq!(outcome.diagnostics.skipped_fragments.len(), 1);
        assert!(outcome.diagnostics.skipped_fragments[0].contains("TEXT"));
    }

    #[test]
    fn char_refs_are_stripped_before_field_parsing() {
        let doc = "<REUTERS NEWID=\"1\"><TEXT><BODY>Price &#5;is &#123;high&#12;</BODY></TEXT></REUTERS>";
        let outcome = SgmlParser::new().parse_str(doc);
        assert_eq!(outcome.records[0].body, "Price is high");
        assert_eq!(outcome.diagnostics.stripped_refs, 3);
    }

    #[test]
    fn named_entities_are_decoded_in_text() {
        let doc = "<REUTERS NEWID=\"1\"><TEXT><BODY>A &lt;B&gt; &amp; C</BODY></TEXT></REUTERS>";
        let (record, _) = parse_one(doc);
        assert_eq!(record.body, "A <B> & C");
    }

    #[test]
    fn date_lookup_does_not_match_dateline() {
        // <DATELINE> must not be mistaken for <DATE>.
        let doc = r#"<REUTERS NEWID="1"><TEXT><DATELINE>NYC</DATELINE><TITLE>t</TITLE></TEXT></REUTERS>"#;
        let (record, diagnostics) = parse_one(doc);
        assert!(record.date.is_none());
        assert!(diagnostics.date_anomalies.is_empty());
        assert_eq!(record.dateline, "NYC");
    }

    #[test]
    fn parse_is_idempotent() {
        let parser = SgmlParser::new();
        let first = parser.parse_str(DOC);
        let second = parser.parse_str(DOC);
        assert_eq!(first.records, second.records);
    }

    #[test]
    fn element_attr_handles_spacing() {
        let elem = Element::find_in(r#"<REUTERS  OLDID = "12"  NEWID="34">x</REUTERS>"#, "REUTERS")
            .unwrap();
        assert_eq!(elem.attr("OLDID"), Some("12"));
        assert_eq!(elem.attr("NEWID"), Some("34"));
        assert_eq!(elem.attr("TOPICS"), None);
    }
}
