use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::decoder;
use crate::corpus::diagnostics::Diagnostics;
use crate::corpus::sgml::{ParseOutcome, SgmlParser};
use crate::error::{NewswireError, Result};
use crate::models::corpus::Corpus;

/// A fully loaded corpus plus everything the parser recovered from.
#[derive(Debug)]
pub struct LoadedCorpus {
    pub corpus: Corpus,
    pub diagnostics: Diagnostics,
}

/// Loads every corpus file directly under a directory (no recursion) and
/// concatenates their documents into one corpus.
pub struct CorpusLoader {
    parser: SgmlParser,
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: SgmlParser::new(),
        }
    }

    /// Parse a single corpus file.
    pub fn load_file(&self, path: &Path) -> Result<ParseOutcome> {
        let (text, lossy) = decoder::read_lossy(path)?;
        let mut outcome = self.parser.parse_str(&text);
        if lossy {
            outcome.diagnostics.lossy_decodes += 1;
        }
        Ok(outcome)
    }

    /// Load a whole directory, processing files in sorted name order so
    /// repeated runs produce identical row order.
    pub fn load_dir(&self, dir: &Path) -> Result<LoadedCorpus> {
        if !dir.exists() {
            return Err(NewswireError::CorpusDirNotFound {
                path: dir.display().to_string(),
            });
        }
        if !dir.is_dir() {
            return Err(NewswireError::NotADirectory {
                path: dir.display().to_string(),
            });
        }

        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
            .map(|e| e.path())
            .collect();
        files.sort();

        let mut corpus = Corpus::default();
        let mut diagnostics = Diagnostics::default();
        for path in &files {
            let outcome = self.load_file(path)?;
            tracing::info!("{}: {} documents", path.display(), outcome.records.len());
            corpus.records.extend(outcome.records);
            diagnostics.merge(outcome.diagnostics);
        }

        tracing::info!(
            "loaded {} documents x {} fields from {} files",
            corpus.len(),
            Corpus::COLUMNS.len(),
            files.len()
        );
        if !diagnostics.is_clean() {
            tracing::warn!(
                "recovered anomalies: {} lossy decodes, {} stripped refs, {} date anomalies, {} skipped fragments",
                diagnostics.lossy_decodes,
                diagnostics.stripped_refs,
                diagnostics.date_anomalies.len(),
                diagnostics.skipped_fragments.len()
            );
        }
        Ok(LoadedCorpus { corpus, diagnostics })
    }
}
