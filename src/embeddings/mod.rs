// Embeddings module
// Text vectorization and section splitting for the indexing pipeline

pub mod splitting;
pub mod vectorizer;

pub use splitting::{SECTION_LABEL_MAX_CHARS, section_label, split_sections};
pub use vectorizer::{DEFAULT_DIMENSION, HashingVectorizer, Vectorizer};
