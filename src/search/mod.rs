// Search module
// Ranks persisted section vectors against an embedded query


use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::DocdexError;
use crate::database::sqlite::Database;
use crate::embeddings::Vectorizer;

/// Number of results returned when the caller does not specify a limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

pub struct SearchEngine {
    database: Database,
    vectorizer: Arc<dyn Vectorizer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub document_id: i64,
    pub document_title: String,
    pub section_text: String,
    pub similarity: f32,
}

impl SearchEngine {
    #[inline]
    pub fn new(database: Database, vectorizer: Arc<dyn Vectorizer>) -> Self {
        Self {
            database,
            vectorizer,
        }
    }

    /// Rank every persisted section against `query` and return the top
    /// `limit` matches (default 5). A zero limit is rejected.
    #[inline]
    pub async fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<SearchResult>> {
        let limit = match limit {
            None => DEFAULT_SEARCH_LIMIT,
            Some(0) => return Err(DocdexError::InvalidLimit(0).into()),
            Some(n) => n,
        };

        let query_vector = self.vectorizer.embed(query);
        let candidates = self
            .database
            .list_section_candidates()
            .await
            .context("Failed to load section candidates")?;

        let total = candidates.len();
        let mut results: Vec<SearchResult> = candidates
            .into_iter()
            .map(|candidate| {
                let similarity = dot(&query_vector, &candidate.embedding);
                SearchResult {
                    document_id: candidate.document_id,
                    document_title: candidate.document_title,
                    section_text: candidate.content,
                    similarity,
                }
            })
            .collect();

        // Stable sort: equal scores keep storage order.
        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);

        debug!(
            "Search for '{}' scored {} sections, returning {}",
            query,
            total,
            results.len()
        );
        Ok(results)
    }
}

/// Dot product of two vectors. Stored vectors are unit length or all-zero,
/// so this equals cosine similarity, with zero-vector comparisons scoring 0.
/// A dimension mismatch (stale rows from an older configuration) scores 0.
fn dot(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
