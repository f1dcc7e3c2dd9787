use std::path::Path;

use clap::Parser;

use newswire::cli::commands::{Cli, Command};
use newswire::cli::output;
use newswire::config::Settings;
use newswire::corpus::loader::CorpusLoader;
use newswire::dataset::curator;
use newswire::error::Result;
use newswire::models::corpus::Corpus;
use newswire::pipeline;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("newswire=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Load { dir, export } => cmd_load(&dir, export.as_deref()),
        Command::Stats {
            dir,
            min_topic_count,
        } => cmd_stats(&dir, min_topic_count),
        Command::Train {
            dir,
            epochs,
            vocab_size,
            hidden,
            batch_size,
            learning_rate,
            min_topic_count,
            validation_rows,
            seed,
        } => {
            let mut settings = Settings::from_cwd()?;
            apply(&mut settings.model.epochs, epochs);
            apply(&mut settings.features.vocab_size, vocab_size);
            apply(&mut settings.model.hidden_dim, hidden);
            apply(&mut settings.model.batch_size, batch_size);
            apply(&mut settings.model.learning_rate, learning_rate);
            apply(&mut settings.dataset.min_topic_count, min_topic_count);
            apply(&mut settings.dataset.validation_rows, validation_rows);
            apply(&mut settings.model.seed, seed);
            cmd_train(&dir, &settings)
        }
    }
}

fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn cmd_load(dir: &str, export: Option<&str>) -> Result<()> {
    let loaded = CorpusLoader::new().load_dir(Path::new(dir))?;

    if let Some(path) = export {
        let mut lines = String::new();
        for record in &loaded.corpus.records {
            lines.push_str(&serde_json::to_string(record)?);
            lines.push('\n');
        }
        std::fs::write(path, lines)?;
        tracing::info!("exported {} records to {path}", loaded.corpus.len());
    }

    #[derive(serde::Serialize)]
    struct LoadOutput<'a> {
        documents: usize,
        columns: &'a [&'a str],
        diagnostics: &'a newswire::corpus::diagnostics::Diagnostics,
    }
    println!(
        "{}",
        output::format_json(&LoadOutput {
            documents: loaded.corpus.len(),
            columns: &Corpus::COLUMNS,
            diagnostics: &loaded.diagnostics,
        })
    );
    Ok(())
}

fn cmd_stats(dir: &str, min_topic_count: Option<usize>) -> Result<()> {
    let mut settings = Settings::from_cwd()?;
    apply(&mut settings.dataset.min_topic_count, min_topic_count);

    let loaded = CorpusLoader::new().load_dir(Path::new(dir))?;
    let dataset = curator::curate(&loaded.corpus, &settings.curator())?;

    #[derive(serde::Serialize)]
    struct TopicCount {
        topic: String,
        count: usize,
    }
    #[derive(serde::Serialize)]
    struct StatsOutput {
        documents: usize,
        dropped: usize,
        train_rows: usize,
        test_rows: usize,
        classes: usize,
        topics: Vec<TopicCount>,
    }
    println!(
        "{}",
        output::format_json(&StatsOutput {
            documents: loaded.corpus.len(),
            dropped: dataset.dropped,
            train_rows: dataset.train.len(),
            test_rows: dataset.test.len(),
            classes: dataset.label_names.len(),
            topics: dataset
                .topic_counts()
                .into_iter()
                .map(|(topic, count)| TopicCount { topic, count })
                .collect(),
        })
    );
    Ok(())
}

fn cmd_train(dir: &str, settings: &Settings) -> Result<()> {
    let report = pipeline::run_training(Path::new(dir), settings)?;
    println!("{}", output::format_json(&report));
    Ok(())
}
