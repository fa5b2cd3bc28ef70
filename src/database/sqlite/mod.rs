use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use tracing::{debug, info};

use crate::database::sqlite::models::{
    Document, IndexStatistics, NewDocument, NewSection, Section, SectionCandidate,
};
use crate::database::sqlite::queries::{DocumentQueries, SectionQueries};


pub mod models;
pub mod queries;

pub type DbPool = Pool<Sqlite>;

#[derive(Debug, Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    #[inline]
    pub async fn new<P: AsRef<Path>>(database_url: P) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(database_url)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await
            .context("Failed to create database connection pool")?;

        let database = Self { pool };
        database.run_migrations().await?;

        Ok(database)
    }

    #[inline]
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    #[inline]
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations");

        sqlx::migrate!("src/database/sqlite/migrations")
            .run(&self.pool)
            .await
            .context("Failed to run schema migration")?;

        debug!("Database migrations completed successfully");
        Ok(())
    }

    #[inline]
    pub async fn initialize_from_config_dir(config_dir: &Path) -> Result<Self> {
        let db_path = config_dir.join("documents.db");
        let db_url = db_path.to_string_lossy();

        std::fs::create_dir_all(config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        Self::new(db_url.as_ref()).await
    }

    // Document operations
    #[inline]
    pub async fn get_document_by_id(&self, id: i64) -> Result<Option<Document>> {
        DocumentQueries::get_by_id(&self.pool, id).await
    }

    #[inline]
    pub async fn list_documents(&self) -> Result<Vec<Document>> {
        DocumentQueries::list_all(&self.pool).await
    }

    #[inline]
    pub async fn insert_document(&self, document: NewDocument) -> Result<Document> {
        DocumentQueries::create(&self.pool, document).await
    }

    #[inline]
    pub async fn update_document_content(
        &self,
        id: i64,
        content: &str,
    ) -> Result<Option<Document>> {
        DocumentQueries::update_content(&self.pool, id, content).await
    }

    #[inline]
    pub async fn mark_document_indexed(
        &self,
        id: i64,
        section_count: usize,
    ) -> Result<Option<Document>> {
        DocumentQueries::mark_indexed(&self.pool, id, section_count).await
    }

    // Section operations
    #[inline]
    pub async fn replace_document_sections(
        &self,
        document_id: i64,
        sections: Vec<NewSection>,
    ) -> Result<usize> {
        SectionQueries::replace_for_document(&self.pool, document_id, sections).await
    }

    #[inline]
    pub async fn get_sections_for_document(&self, document_id: i64) -> Result<Vec<Section>> {
        SectionQueries::list_by_document(&self.pool, document_id).await
    }

    #[inline]
    pub async fn list_section_candidates(&self) -> Result<Vec<SectionCandidate>> {
        SectionQueries::list_candidates(&self.pool).await
    }

    #[inline]
    pub async fn statistics(&self) -> Result<IndexStatistics> {
        SectionQueries::statistics(&self.pool).await
    }

    /// Optimize database performance by running VACUUM and ANALYZE
    #[inline]
    pub async fn optimize(&self) -> Result<()> {
        info!("Optimizing database performance");

        sqlx::query("VACUUM")
            .execute(&self.pool)
            .await
            .context("Failed to vacuum database")?;

        sqlx::query("ANALYZE")
            .execute(&self.pool)
            .await
            .context("Failed to analyze database")?;

        debug!("Database optimization completed");
        Ok(())
    }
}
