use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wikisense::commands;
use wikisense::config::Config;

#[derive(Parser)]
#[command(
    name = "wikisense",
    version,
    about = "Wikilinks corpus analyzer: ambiguous entity mentions via MediaWiki redirect resolution",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Find surface forms whose mentions split across popular targets
    Ambiguous {
        /// Directory holding the ten data-0000x-of-00010 shards
        #[arg(short, long)]
        corpus: PathBuf,

        /// How many ambiguous entities to find before stopping
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Minimum mentions per target for it to count as popular
        #[arg(short, long, default_value = "5")]
        threshold: u32,

        /// How many popular targets make a form ambiguous
        #[arg(short, long, default_value = "2")]
        k_ann: usize,

        /// Report output path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List every document annotating the given surface forms, per target
    Annotations {
        /// Directory holding the ten data-0000x-of-00010 shards
        #[arg(short, long)]
        corpus: PathBuf,

        /// Surface form to look for (repeatable)
        #[arg(short, long = "form", required = true)]
        forms: Vec<String>,

        /// Report output path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List the surface forms referring to a target article, with documents
    Synonyms {
        /// Directory holding the ten data-0000x-of-00010 shards
        #[arg(short, long)]
        corpus: PathBuf,

        /// Target article URL (redirects are followed)
        #[arg(short, long)]
        url: String,

        /// Report output path
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = Config::from_env();
    tracing::info!(endpoint = %config.api.endpoint, "wikisense starting");

    match cli.command {
        Commands::Ambiguous {
            corpus,
            count,
            threshold,
            k_ann,
            output,
        } => {
            tracing::info!(
                corpus = %corpus.display(),
                count = %count,
                threshold = %threshold,
                k_ann = %k_ann,
                "Starting ambiguous command"
            );
            commands::ambiguous(config, corpus, count, threshold, k_ann, output).await?;
        }

        Commands::Annotations {
            corpus,
            forms,
            output,
        } => {
            tracing::info!(
                corpus = %corpus.display(),
                forms = ?forms,
                "Starting annotations command"
            );
            commands::annotations(config, corpus, forms, output).await?;
        }

        Commands::Synonyms {
            corpus,
            url,
            output,
        } => {
            tracing::info!(
                corpus = %corpus.display(),
                url = %url,
                "Starting synonyms command"
            );
            commands::synonyms(config, corpus, url, output).await?;
        }
    }

    tracing::info!("wikisense completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("wikisense=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("wikisense=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
