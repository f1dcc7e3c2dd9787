// Pedantic lint configuration for the crate.
// Most of these are reasonable but too strict for this codebase:
// - cast_precision_loss / cast_possible_truncation: row and word counts
//   become f32 metrics and matrix values
// - cast_sign_loss: counts are always non-negative here
// - missing_errors_doc: error handling is self-evident from Result types
// - missing_panics_doc: panics are rare and documented inline
// - module_name_repetitions: CorpusLoader lives in corpus, etc.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod error;
pub mod features;
pub mod ml;
pub mod models;
pub mod pipeline;
