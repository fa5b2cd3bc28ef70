use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocdexError>;

#[derive(Error, Debug)]
pub enum DocdexError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Invalid search limit: {0} (must be a positive integer)")]
    InvalidLimit(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod commands;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod indexer;
pub mod search;
