use std::fs;
use std::path::Path;

use crate::error::Result;

/// Read a corpus file as UTF-8, falling back to a lossy per-line decode
/// when the file contains invalid byte sequences.
///
/// The fallback drops the malformed bytes entirely and rejoins the lines
/// with `\n`; it always produces text. Returns the decoded text and
/// whether the fallback fired.
pub fn read_lossy(path: &Path) -> Result<(String, bool)> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok((text, false)),
        Err(err) => {
            tracing::warn!(
                "failed to read {} as utf-8, dropping malformed bytes",
                path.display()
            );
            Ok((decode_lines(&err.into_bytes()), true))
        }
    }
}

fn decode_lines(bytes: &[u8]) -> String {
    let lines: Vec<String> = bytes
        .split(|b| *b == b'\n')
        .map(|line| {
            String::from_utf8_lossy(line)
                .chars()
                .filter(|c| *c != char::REPLACEMENT_CHARACTER)
                .collect()
        })
        .collect();
    lines.join("\n")
}
