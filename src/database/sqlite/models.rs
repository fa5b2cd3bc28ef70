use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// Metadata key holding the RFC 3339 timestamp of the last indexing run.
pub const METADATA_INDEXED_AT: &str = "indexed_at";
/// Metadata key holding the number of sections produced by the last indexing run.
pub const METADATA_SECTION_COUNT: &str = "section_count";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub searchable_text: Option<String>,
    /// Free-form JSON object owned by the document-management layer; the
    /// indexer only merges its own keys into it.
    pub metadata: String,
    pub created_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: i64,
    pub document_id: i64,
    pub label: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub position: i64,
    pub indexed_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSection {
    pub document_id: i64,
    pub label: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub position: i64,
}

/// A section row joined with its owning document, as consumed by search.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionCandidate {
    pub document_id: i64,
    pub document_title: String,
    pub content: String,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStatistics {
    pub total_documents: i64,
    pub indexed_documents: i64,
    pub total_sections: i64,
}

impl Document {
    /// Parse the metadata column into a JSON object map. Malformed or
    /// non-object metadata is treated as empty.
    #[inline]
    pub fn metadata_map(&self) -> Map<String, Value> {
        serde_json::from_str::<Value>(&self.metadata)
            .ok()
            .and_then(|value| value.as_object().cloned())
            .unwrap_or_default()
    }

    #[inline]
    pub fn indexed_at(&self) -> Option<String> {
        self.metadata_map()
            .get(METADATA_INDEXED_AT)
            .and_then(|value| value.as_str().map(str::to_string))
    }

    #[inline]
    pub fn section_count(&self) -> Option<i64> {
        self.metadata_map()
            .get(METADATA_SECTION_COUNT)
            .and_then(Value::as_i64)
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.indexed_at().is_some()
    }
}

/// Encode an embedding vector as a little-endian f32 BLOB.
#[inline]
pub fn encode_embedding(vector: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(std::mem::size_of_val(vector));
    for &value in vector {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Decode a little-endian f32 BLOB back into an embedding vector.
#[inline]
pub fn decode_embedding(blob: &[u8]) -> Result<Vec<f32>> {
    if blob.len() % 4 != 0 {
        anyhow::bail!("invalid embedding byte length: {}", blob.len());
    }

    let mut vector = Vec::with_capacity(blob.len() / 4);
    for chunk in blob.chunks_exact(4) {
        let value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        if !value.is_finite() {
            anyhow::bail!("embedding contains non-finite values");
        }
        vector.push(value);
    }
    Ok(vector)
}

/// Merge the indexer-owned keys into a document's metadata JSON, preserving
/// all other keys.
#[inline]
pub fn merge_index_metadata(
    metadata: &str,
    indexed_at: &str,
    section_count: usize,
) -> Result<String> {
    let mut map = serde_json::from_str::<Value>(metadata)
        .ok()
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_default();

    map.insert(
        METADATA_INDEXED_AT.to_string(),
        Value::String(indexed_at.to_string()),
    );
    map.insert(
        METADATA_SECTION_COUNT.to_string(),
        Value::Number(section_count.into()),
    );

    serde_json::to_string(&Value::Object(map)).context("Failed to serialize document metadata")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn test_document(metadata: &str) -> Document {
        Document {
            id: 1,
            title: "Maintenance Manual".to_string(),
            content: "Pool pump care.".to_string(),
            searchable_text: None,
            metadata: metadata.to_string(),
            created_date: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn embedding_blob_roundtrip() {
        let vector = vec![0.0f32, 1.0, -0.5, 0.25];
        let blob = encode_embedding(&vector);
        assert_eq!(blob.len(), 16);
        let decoded = decode_embedding(&blob).expect("can decode embedding");
        assert_eq!(decoded, vector);
    }

    #[test]
    fn decode_rejects_truncated_blob() {
        assert!(decode_embedding(&[1, 2, 3]).is_err());
    }

    #[test]
    fn decode_rejects_non_finite_values() {
        let blob = encode_embedding(&[f32::NAN]);
        assert!(decode_embedding(&blob).is_err());
    }

    #[test]
    fn metadata_accessors() {
        let document = test_document(r#"{"indexed_at":"2026-01-01T00:00:00Z","section_count":3}"#);
        assert_eq!(
            document.indexed_at().as_deref(),
            Some("2026-01-01T00:00:00Z")
        );
        assert_eq!(document.section_count(), Some(3));
        assert!(document.is_indexed());
    }

    #[test]
    fn malformed_metadata_reads_as_empty() {
        let document = test_document("not json");
        assert!(document.metadata_map().is_empty());
        assert!(!document.is_indexed());
        assert_eq!(document.section_count(), None);
    }

    #[test]
    fn merge_preserves_foreign_keys() {
        let merged = merge_index_metadata(
            r#"{"owner":"facilities","tags":["pool"]}"#,
            "2026-01-01T00:00:00Z",
            2,
        )
        .expect("can merge metadata");

        let value: serde_json::Value =
            serde_json::from_str(&merged).expect("merged metadata is valid JSON");
        assert_eq!(value["owner"], "facilities");
        assert_eq!(value["tags"][0], "pool");
        assert_eq!(value[METADATA_INDEXED_AT], "2026-01-01T00:00:00Z");
        assert_eq!(value[METADATA_SECTION_COUNT], 2);
    }

    #[test]
    fn merge_overwrites_previous_index_keys() {
        let first = merge_index_metadata("{}", "2026-01-01T00:00:00Z", 5).expect("first merge");
        let second = merge_index_metadata(&first, "2026-02-01T00:00:00Z", 1).expect("second merge");

        let value: serde_json::Value =
            serde_json::from_str(&second).expect("merged metadata is valid JSON");
        assert_eq!(value[METADATA_INDEXED_AT], "2026-02-01T00:00:00Z");
        assert_eq!(value[METADATA_SECTION_COUNT], 1);
    }
}
