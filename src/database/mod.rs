// Database module
// SQLite persistence for documents and their embedded sections

pub mod sqlite;
