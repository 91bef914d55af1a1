//! Condense CLI
//!
//! Commands:
//!   serve - Start the summarization HTTP server
//!   summarize - Summarize local text files from the command line
//!   info - Show the configured model and windowing parameters

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use condense::{server, CandleSummarizer, Config, SummarizeOptions, Summarizer};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "condense")]
#[command(about = "Long-document summarization with local transformer inference")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,
    },

    /// Summarize one or more text files and print the result
    Summarize {
        /// Paths of text files to summarize together
        files: Vec<PathBuf>,
    },

    /// Show model info and windowing parameters
    Info,
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Load the model eagerly so the first request doesn't pay the startup cost.
fn load_summarizer(config: &Config) -> Result<Summarizer> {
    let model = CandleSummarizer::load(config)?;
    let summarizer = Summarizer::new(Arc::new(model), SummarizeOptions::from_config(config))?;
    Ok(summarizer)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::load()?.unwrap_or_default();

    match cli.command {
        Commands::Serve { port } => {
            let summarizer = load_summarizer(&config)?;
            let state = Arc::new(server::AppState {
                summarizer,
                model_name: config.model.name().to_string(),
            });
            server::run(state, port).await?;
        }

        Commands::Summarize { files } => {
            if files.is_empty() {
                anyhow::bail!("no input files given");
            }

            let mut texts = Vec::with_capacity(files.len());
            for path in &files {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                texts.push(text);
            }

            let full_text = condense::preprocess::concatenate_documents(&texts);
            if full_text.is_empty() {
                anyhow::bail!("no text found in input files");
            }

            let summarizer = load_summarizer(&config)?;
            let summary = summarizer.summarize_long_text(&full_text)?;
            println!("{}", summary);
        }

        Commands::Info => {
            println!("Condense - Local Document Summarizer\n");
            println!(
                "Model:     {} ({} MB, {} token capacity)",
                config.model.name(),
                config.model.size_mb(),
                config.model.capacity()
            );
            println!("Device:    {}", config.device.name());
            println!(
                "Windowing: size={} stride={} max_depth={}",
                config.window_size, config.stride, config.max_depth
            );
            let workers = if config.workers == 0 {
                "auto".to_string()
            } else {
                config.workers.to_string()
            };
            println!("Workers:   {}", workers);
            match Config::path() {
                Ok(path) => println!("Config:    {}", path.display()),
                Err(_) => println!("Config:    (unavailable)"),
            }
        }
    }

    Ok(())
}
