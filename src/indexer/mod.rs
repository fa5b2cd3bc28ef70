// Indexer module
// Turns document content into persisted, embedded section rows


use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::database::sqlite::Database;
use crate::database::sqlite::models::NewSection;
use crate::embeddings::{Vectorizer, section_label, split_sections};

/// Indexes documents into embedded section rows.
///
/// Writers targeting the same document id are serialized through a
/// per-document lock; distinct ids proceed independently.
pub struct Indexer {
    database: Database,
    vectorizer: Arc<dyn Vectorizer>,
    document_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

/// Outcome of a full reindex pass over every known document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReindexReport {
    pub documents_processed: usize,
    pub sections_indexed: usize,
    pub failures: Vec<ReindexFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReindexFailure {
    pub document_id: i64,
    pub error: String,
}

impl ReindexReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Indexer {
    #[inline]
    pub fn new(database: Database, vectorizer: Arc<dyn Vectorizer>) -> Self {
        Self {
            database,
            vectorizer,
            document_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Re-embed one document and replace its persisted section rows.
    ///
    /// Returns the number of sections written. A missing document id is a
    /// no-op returning 0.
    #[inline]
    pub async fn index_document(&self, document_id: i64) -> Result<usize> {
        let lock = self.document_lock(document_id).await;
        let _guard = lock.lock().await;

        let Some(document) = self
            .database
            .get_document_by_id(document_id)
            .await
            .context("Failed to load document for indexing")?
        else {
            warn!("Skipping indexing for missing document {}", document_id);
            return Ok(0);
        };

        let sections = split_sections(&document.content);
        let rows: Vec<NewSection> = sections
            .iter()
            .enumerate()
            .map(|(position, text)| NewSection {
                document_id,
                label: section_label(text),
                content: text.clone(),
                embedding: self.vectorizer.embed(text),
                position: position as i64,
            })
            .collect();

        let written = self
            .database
            .replace_document_sections(document_id, rows)
            .await
            .with_context(|| format!("Failed to persist sections for document {}", document_id))?;

        self.database
            .mark_document_indexed(document_id, written)
            .await
            .with_context(|| {
                format!("Failed to update index metadata for document {}", document_id)
            })?;

        info!("Indexed document {} ({} sections)", document_id, written);
        Ok(written)
    }

    /// Rebuild the whole index by running [`Indexer::index_document`] over
    /// every known document. A failure for one document is recorded and does
    /// not abort the rest of the batch.
    #[inline]
    pub async fn reindex_all(&self) -> Result<ReindexReport> {
        let documents = self
            .database
            .list_documents()
            .await
            .context("Failed to load documents for reindexing")?;

        info!("Reindexing {} documents", documents.len());

        let mut report = ReindexReport::default();
        for document in documents {
            match self.index_document(document.id).await {
                Ok(count) => {
                    report.documents_processed += 1;
                    report.sections_indexed += count;
                }
                Err(e) => {
                    error!("Failed to reindex document {}: {}", document.id, e);
                    report.failures.push(ReindexFailure {
                        document_id: document.id,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Reindex complete: {} documents, {} sections, {} failures",
            report.documents_processed,
            report.sections_indexed,
            report.failures.len()
        );
        Ok(report)
    }

    async fn document_lock(&self, document_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.document_locks.lock().await;
        Arc::clone(
            locks
                .entry(document_id)
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }
}
