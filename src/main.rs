use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use docdex::Result;
use docdex::commands::{
    add_document, index_document, list_documents, reindex_all, search, show_status,
};
use docdex::config::{run_interactive_config, show_config};

#[derive(Parser)]
#[command(name = "docdex")]
#[command(about = "A document section indexing and semantic search system")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure index settings
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Add a new document and index it
    Add {
        /// Title of the document
        title: String,
        /// Read the document content from a file
        #[arg(long, conflicts_with = "content")]
        file: Option<PathBuf>,
        /// Provide the document content inline
        #[arg(long)]
        content: Option<String>,
    },
    /// List all documents
    List,
    /// Index (or re-index) a document by id
    Index {
        /// Document id to index
        document_id: i64,
    },
    /// Rebuild the embedding index for every document
    Reindex,
    /// Search indexed sections by semantic similarity
    Search {
        /// Search query text
        query: String,
        /// Maximum number of results (default: 5)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show detailed status of the index
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { show } => {
            if show {
                show_config()?;
            } else {
                run_interactive_config()?;
            }
        }
        Commands::Add {
            title,
            file,
            content,
        } => {
            let content = if let Some(path) = file {
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read content file: {}", path.display()))?
            } else if let Some(text) = content {
                text
            } else {
                return Err(
                    anyhow::anyhow!("Provide document content via --file or --content").into(),
                );
            };

            let document = add_document(title, content).await?;
            index_document(document.id).await?;
        }
        Commands::List => {
            list_documents().await?;
        }
        Commands::Index { document_id } => {
            index_document(document_id).await?;
        }
        Commands::Reindex => {
            reindex_all().await?;
        }
        Commands::Search { query, limit } => {
            search(query, limit).await?;
        }
        Commands::Status => {
            show_status().await?;
        }
    }

    Ok(())
}
