use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::models::{
    Document, IndexStatistics, NewDocument, NewSection, Section, SectionCandidate,
    decode_embedding, encode_embedding, merge_index_metadata,
};

pub struct DocumentQueries;

impl DocumentQueries {
    #[inline]
    pub async fn create(pool: &SqlitePool, new_document: NewDocument) -> Result<Document> {
        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO documents (title, content, metadata, created_date) VALUES (?, ?, '{}', ?)",
        )
        .bind(&new_document.title)
        .bind(&new_document.content)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to create document")?
        .last_insert_rowid();

        Self::get_by_id(pool, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created document"))
    }

    #[inline]
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Document>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, searchable_text, metadata, created_date
            FROM documents WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get document by id")?;

        Ok(row.map(|row| Document {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            searchable_text: row.get("searchable_text"),
            metadata: row.get("metadata"),
            created_date: row.get("created_date"),
        }))
    }

    #[inline]
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, searchable_text, metadata, created_date
            FROM documents ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to list all documents")?;

        Ok(rows
            .into_iter()
            .map(|row| Document {
                id: row.get("id"),
                title: row.get("title"),
                content: row.get("content"),
                searchable_text: row.get("searchable_text"),
                metadata: row.get("metadata"),
                created_date: row.get("created_date"),
            })
            .collect())
    }

    /// Record a completed indexing run: copy the raw content into the
    /// searchable-text column and merge the indexing keys into metadata.
    #[inline]
    pub async fn mark_indexed(
        pool: &SqlitePool,
        id: i64,
        section_count: usize,
    ) -> Result<Option<Document>> {
        let Some(document) = Self::get_by_id(pool, id).await? else {
            return Ok(None);
        };

        let indexed_at = Utc::now().to_rfc3339();
        let metadata = merge_index_metadata(&document.metadata, &indexed_at, section_count)?;

        sqlx::query("UPDATE documents SET searchable_text = ?, metadata = ? WHERE id = ?")
            .bind(&document.content)
            .bind(&metadata)
            .bind(id)
            .execute(pool)
            .await
            .context("Failed to update document index metadata")?;

        Self::get_by_id(pool, id).await
    }

    /// Replace a document's raw content. Callers are expected to follow up
    /// with an indexing run; until then the stored sections and
    /// searchable-text copy reflect the previous content.
    #[inline]
    pub async fn update_content(
        pool: &SqlitePool,
        id: i64,
        content: &str,
    ) -> Result<Option<Document>> {
        sqlx::query("UPDATE documents SET content = ? WHERE id = ?")
            .bind(content)
            .bind(id)
            .execute(pool)
            .await
            .context("Failed to update document content")?;

        Self::get_by_id(pool, id).await
    }

    #[inline]
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .context("Failed to delete document")?;

        Ok(result.rows_affected() > 0)
    }
}

pub struct SectionQueries;

impl SectionQueries {
    /// Replace a document's section rows with a freshly indexed set.
    ///
    /// Delete and inserts run in one transaction so readers observe either
    /// the previous section set or the new one, never a partial mix.
    #[inline]
    pub async fn replace_for_document(
        pool: &SqlitePool,
        document_id: i64,
        sections: Vec<NewSection>,
    ) -> Result<usize> {
        let mut transaction = pool
            .begin()
            .await
            .context("Failed to begin transaction for section replacement")?;

        sqlx::query("DELETE FROM sections WHERE document_id = ?")
            .bind(document_id)
            .execute(&mut *transaction)
            .await
            .context("Failed to delete prior sections")?;

        let now = Utc::now();
        let inserted = sections.len();

        for section in sections {
            sqlx::query(
                r#"
                INSERT INTO sections (document_id, label, content, embedding, position, indexed_date)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(section.document_id)
            .bind(&section.label)
            .bind(&section.content)
            .bind(encode_embedding(&section.embedding))
            .bind(section.position)
            .bind(now)
            .execute(&mut *transaction)
            .await
            .context("Failed to insert section row")?;
        }

        transaction
            .commit()
            .await
            .context("Failed to commit section replacement transaction")?;

        debug!(
            "Replaced sections for document {}: {} rows",
            document_id, inserted
        );
        Ok(inserted)
    }

    #[inline]
    pub async fn list_by_document(pool: &SqlitePool, document_id: i64) -> Result<Vec<Section>> {
        let rows = sqlx::query(
            r#"
            SELECT id, document_id, label, content, embedding, position, indexed_date
            FROM sections WHERE document_id = ? ORDER BY position ASC
            "#,
        )
        .bind(document_id)
        .fetch_all(pool)
        .await
        .context("Failed to list sections by document")?;

        let mut sections = Vec::with_capacity(rows.len());
        for row in rows {
            let blob: Vec<u8> = row.get("embedding");
            sections.push(Section {
                id: row.get("id"),
                document_id: row.get("document_id"),
                label: row.get("label"),
                content: row.get("content"),
                embedding: decode_embedding(&blob)?,
                position: row.get("position"),
                indexed_date: row.get("indexed_date"),
            });
        }

        Ok(sections)
    }

    /// All persisted sections joined with their document titles, in storage
    /// order. Search relies on this ordering for stable tie-breaking.
    #[inline]
    pub async fn list_candidates(pool: &SqlitePool) -> Result<Vec<SectionCandidate>> {
        let rows = sqlx::query(
            r#"
            SELECT s.document_id, d.title, s.content, s.embedding
            FROM sections s
            JOIN documents d ON d.id = s.document_id
            ORDER BY s.document_id ASC, s.position ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to list section candidates")?;

        let mut candidates = Vec::with_capacity(rows.len());
        for row in rows {
            let blob: Vec<u8> = row.get("embedding");
            candidates.push(SectionCandidate {
                document_id: row.get("document_id"),
                document_title: row.get("title"),
                content: row.get("content"),
                embedding: decode_embedding(&blob)?,
            });
        }

        Ok(candidates)
    }

    #[inline]
    pub async fn count_by_document(pool: &SqlitePool, document_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM sections WHERE document_id = ?")
            .bind(document_id)
            .fetch_one(pool)
            .await
            .context("Failed to count sections by document")?;
        let count: i64 = row.get("count");

        Ok(count)
    }

    #[inline]
    pub async fn statistics(pool: &SqlitePool) -> Result<IndexStatistics> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM documents) as total_documents,
                (SELECT COUNT(*) FROM documents WHERE searchable_text IS NOT NULL) as indexed_documents,
                (SELECT COUNT(*) FROM sections) as total_sections
            "#,
        )
        .fetch_one(pool)
        .await
        .context("Failed to gather index statistics")?;

        Ok(IndexStatistics {
            total_documents: row.get("total_documents"),
            indexed_documents: row.get("indexed_documents"),
            total_sections: row.get("total_sections"),
        })
    }
}
