//! Content-addressed SQLite document index.
//!
//! Schema:
//! - documents: id, path (unique), name, hash
//! - nodes: id, doc_id -> documents.id, node_id, embedding, metadata
//!
//! A path moves from unknown to recorded exactly once. Re-indexing a
//! recorded path leaves its document row untouched, even when the
//! file has changed since; node records are always appended.
//!
//! Every call opens its own connection. `index_document` runs its
//! check-then-insert and node appends inside one `IMMEDIATE`
//! transaction, so concurrent writers are serialized by SQLite.

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, TransactionBehavior};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::error::{ReadorderError, Result};
use crate::core::types::{DocumentRecord, NewNodeRecord, NodeRecord};

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    path TEXT UNIQUE,
    name TEXT,
    hash TEXT
);

CREATE TABLE IF NOT EXISTS nodes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    doc_id INTEGER,
    node_id TEXT,
    embedding BLOB,
    metadata TEXT,
    FOREIGN KEY (doc_id) REFERENCES documents(id)
);

CREATE INDEX IF NOT EXISTS idx_nodes_doc_id ON nodes(doc_id);
";

const HASH_BUFFER_SIZE: usize = 8192;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to an index database file
#[derive(Debug, Clone)]
pub struct DocumentIndex {
    db_path: PathBuf,
}

impl DocumentIndex {
    /// Open (creating if needed) the index at `db_path` and make sure
    /// the schema exists.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let index = Self { db_path };
        index.ensure_schema()?;
        Ok(index)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Create the documents and nodes tables if absent. Idempotent.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Hash `path`, record it if unknown, and append `nodes` under
    /// its document id. Returns the document id.
    pub fn index_document(&self, path: &Path, nodes: Option<&[NewNodeRecord]>) -> Result<i64> {
        let hash = hash_file(path)?;
        let path_str = path.to_string_lossy();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_str.clone().into_owned());

        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: Option<(i64, Option<String>)> = tx
            .query_row(
                "SELECT id, hash FROM documents WHERE path = ?",
                params![path_str.as_ref()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let doc_id = match existing {
            Some((id, stored_hash)) => {
                if stored_hash.as_deref() != Some(hash.as_str()) {
                    tracing::warn!(
                        "{} changed since it was first indexed; keeping stored hash",
                        path.display()
                    );
                }
                id
            }
            None => insert_document(&tx, &path_str, &name, &hash)?,
        };

        let mut appended = 0;
        if let Some(nodes) = nodes {
            let mut stmt = tx.prepare(
                "INSERT INTO nodes (doc_id, node_id, embedding, metadata) VALUES (?, ?, ?, ?)",
            )?;
            for node in nodes {
                stmt.execute(params![doc_id, node.node_id, node.embedding, node.metadata])?;
                appended += 1;
            }
        }

        tx.commit()?;

        tracing::debug!(
            "Indexed {} as document {} ({} node(s) appended)",
            path.display(),
            doc_id,
            appended
        );
        Ok(doc_id)
    }

    pub fn list_documents(&self) -> Result<Vec<DocumentRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT path, name, hash FROM documents ORDER BY id")?;
        let docs = stmt
            .query_map([], |row| {
                Ok(DocumentRecord {
                    path: row.get(0)?,
                    name: row.get(1)?,
                    hash: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(docs)
    }

    /// Nodes recorded under `path`; empty for a path never indexed
    pub fn list_nodes(&self, path: &Path) -> Result<Vec<NodeRecord>> {
        let conn = self.connect()?;
        let path_str = path.to_string_lossy();

        let doc_id: Option<i64> = conn
            .query_row(
                "SELECT id FROM documents WHERE path = ?",
                params![path_str.as_ref()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(doc_id) = doc_id else {
            return Ok(Vec::new());
        };

        let mut stmt = conn.prepare(
            "SELECT node_id, embedding, metadata FROM nodes WHERE doc_id = ? ORDER BY id",
        )?;
        let nodes = stmt
            .query_map(params![doc_id], |row| {
                Ok(NodeRecord {
                    node_id: row.get(0)?,
                    embedding: row.get(1)?,
                    metadata: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(nodes)
    }

    pub fn document_count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn node_count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Insert a document row. A uniqueness violation means another
/// writer recorded the path first; its id is returned instead.
fn insert_document(conn: &Connection, path: &str, name: &str, hash: &str) -> Result<i64> {
    match conn.execute(
        "INSERT INTO documents (path, name, hash) VALUES (?, ?, ?)",
        params![path, name, hash],
    ) {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            tracing::debug!("{} already recorded by another writer", path);
            let id = conn.query_row(
                "SELECT id FROM documents WHERE path = ?",
                params![path],
                |row| row.get(0),
            )?;
            Ok(id)
        }
        Err(e) => Err(e.into()),
    }
}

/// Lowercase hex SHA-256 of the full contents of `path`
pub fn hash_file(path: &Path) -> Result<String> {
    let hash_error = |source| ReadorderError::Hash {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(hash_error)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; HASH_BUFFER_SIZE];
    loop {
        let read = file.read(&mut buffer).map_err(hash_error)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
