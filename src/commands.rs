use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::database::sqlite::Database;
use crate::database::sqlite::models::{Document, NewDocument};
use crate::database::sqlite::queries::DocumentQueries;
use crate::embeddings::{HashingVectorizer, Vectorizer};
use crate::indexer::Indexer;
use crate::search::SearchEngine;

fn vectorizer_from_config(config: &Config) -> Arc<dyn Vectorizer> {
    Arc::new(HashingVectorizer::new(config.index.dimension))
}

async fn open_database(config: &Config) -> Result<Database> {
    let data_dir = config
        .config_dir_path()
        .context("Failed to resolve data directory")?;
    Database::initialize_from_config_dir(&data_dir)
        .await
        .context("Failed to initialize database")
}

/// Add a new document to the store
#[inline]
pub async fn add_document(title: String, content: String) -> Result<Document> {
    info!("Adding document: {}", title);

    let config = Config::load()?;
    let database = open_database(&config).await?;

    let document = database
        .insert_document(NewDocument { title, content })
        .await
        .context("Failed to create document entry")?;

    println!("Created document: {} (ID: {})", document.title, document.id);

    Ok(document)
}

/// List all documents with their indexing state
#[inline]
pub async fn list_documents() -> Result<()> {
    let config = Config::load()?;
    let database = open_database(&config).await?;

    let documents = DocumentQueries::list_all(database.pool())
        .await
        .context("Failed to list documents")?;

    if documents.is_empty() {
        println!("No documents have been added yet.");
        println!("Use 'docdex add <title> --file <path>' to add one.");
        return Ok(());
    }

    println!("Documents ({} total):", documents.len());
    println!();

    for document in &documents {
        println!("📄 {} (ID: {})", document.title, document.id);

        match document.indexed_at() {
            Some(indexed_at) => {
                println!("   Indexed: {}", indexed_at);
                if let Some(count) = document.section_count() {
                    println!("   Sections: {}", count);
                }
            }
            None => println!("   Indexed: never"),
        }

        println!(
            "   Created: {}",
            document.created_date.format("%Y-%m-%d %H:%M:%S")
        );
        println!();
    }

    let indexed = documents.iter().filter(|d| d.is_indexed()).count();
    println!("Summary:");
    println!("  Total Documents: {}", documents.len());
    println!("  Indexed: {}", indexed);
    println!("  Never Indexed: {}", documents.len() - indexed);

    Ok(())
}

/// Index (or re-index) a single document by id
#[inline]
pub async fn index_document(document_id: i64) -> Result<()> {
    let config = Config::load()?;
    let database = open_database(&config).await?;

    if database
        .get_document_by_id(document_id)
        .await
        .context("Failed to look up document")?
        .is_none()
    {
        println!("Document {} not found; nothing to index.", document_id);
        return Ok(());
    }

    let indexer = Indexer::new(database, vectorizer_from_config(&config));
    let sections = indexer.index_document(document_id).await?;

    println!(
        "Indexed document {} ({} sections).",
        document_id, sections
    );

    Ok(())
}

/// Rebuild the embedding index for every document
#[inline]
pub async fn reindex_all() -> Result<()> {
    let config = Config::load()?;
    let database = open_database(&config).await?;

    let indexer = Indexer::new(database.clone(), vectorizer_from_config(&config));
    let report = indexer.reindex_all().await?;

    // Reclaim the space freed by the replaced section rows.
    database.optimize().await?;

    println!("Reindex complete.");
    println!("  Documents Processed: {}", report.documents_processed);
    println!("  Sections Indexed: {}", report.sections_indexed);

    if !report.is_clean() {
        println!("  Failures: {}", report.failures.len());
        for failure in &report.failures {
            println!("    ⚠️  Document {}: {}", failure.document_id, failure.error);
        }
    }

    Ok(())
}

/// Search indexed sections for the given query
#[inline]
pub async fn search(query: String, limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let database = open_database(&config).await?;

    let engine = SearchEngine::new(database, vectorizer_from_config(&config));
    let results = engine.search(&query, limit).await?;

    if results.is_empty() {
        println!("No indexed sections match '{}'.", query);
        println!("Use 'docdex reindex' if documents were added recently.");
        return Ok(());
    }

    println!("Results for '{}':", query);
    println!();

    for (rank, result) in results.iter().enumerate() {
        println!(
            "{}. [{:.4}] {} (ID: {})",
            rank + 1,
            result.similarity,
            result.document_title,
            result.document_id
        );
        for line in result.section_text.lines() {
            println!("   {}", line);
        }
        println!();
    }

    Ok(())
}

/// Show status of the index and its store
#[inline]
pub async fn show_status() -> Result<()> {
    let config = Config::load().unwrap_or_default();

    println!("📊 Docdex Status Report");
    println!("{}", "=".repeat(50));
    println!();

    println!("🧮 Vectorizer:");
    println!("   Dimension: {}", config.index.dimension);
    println!();

    println!("🗄️  Database Status:");
    let database = match open_database(&config).await {
        Ok(db) => {
            println!("   ✅ SQLite: Connected");
            Some(db)
        }
        Err(e) => {
            println!("   ❌ SQLite: Failed to connect - {}", e);
            None
        }
    };

    if let Some(database) = database {
        println!();
        println!("📚 Index Overview:");
        match database.statistics().await {
            Ok(stats) => {
                println!("   📄 Total Documents: {}", stats.total_documents);
                println!("   ✅ Indexed: {}", stats.indexed_documents);
                println!(
                    "   ⏳ Never Indexed: {}",
                    stats.total_documents - stats.indexed_documents
                );
                println!("   🧩 Total Sections: {}", stats.total_sections);
            }
            Err(e) => {
                println!("   ❌ Failed to load index statistics: {}", e);
            }
        }
    }

    println!();
    println!("💡 Next Steps:");
    println!("   • Use 'docdex add <title> --file <path>' to add a document");
    println!("   • Use 'docdex search <query>' to search indexed sections");
    println!("   • Use 'docdex reindex' after changing the vector dimension");

    Ok(())
}
