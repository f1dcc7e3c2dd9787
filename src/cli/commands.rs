use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "newswire",
    version,
    about = "Reuters-21578 corpus loader and topic classifier",
    after_help = "Corpus files are read directly from the given directory (no recursion) \
                  in sorted name order. Logs go to stderr (RUST_LOG to adjust), results \
                  to stdout as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse all corpus files in a directory and print a summary.
    ///
    /// Encoding problems, malformed character references, unparseable
    /// dates, and damaged documents are recovered where possible and
    /// reported in the summary's diagnostics section.
    Load {
        /// Directory containing .sgm corpus files
        dir: String,
        /// Write the parsed records to a JSON Lines file
        #[arg(long)]
        export: Option<String>,
    },

    /// Show curated dataset statistics (split sizes, topic distribution)
    Stats {
        /// Directory containing .sgm corpus files
        dir: String,
        /// Minimum corpus-wide occurrences for a topic to be kept
        #[arg(long)]
        min_topic_count: Option<usize>,
    },

    /// Train the topic classifier end to end and print a report
    Train {
        /// Directory containing .sgm corpus files
        dir: String,
        /// Training epochs
        #[arg(long)]
        epochs: Option<usize>,
        /// Vocabulary cap (feature-matrix width)
        #[arg(long)]
        vocab_size: Option<usize>,
        /// Hidden layer width
        #[arg(long)]
        hidden: Option<usize>,
        /// Mini-batch size
        #[arg(long)]
        batch_size: Option<usize>,
        /// RMSprop learning rate
        #[arg(long)]
        learning_rate: Option<f32>,
        /// Minimum corpus-wide occurrences for a topic to be kept
        #[arg(long)]
        min_topic_count: Option<usize>,
        /// Train rows held out for validation
        #[arg(long)]
        validation_rows: Option<usize>,
        /// Seed for weight init and batch shuffling
        #[arg(long)]
        seed: Option<u64>,
    },
}
