//! SQLite database layer for items-server
//!
//! Uses rusqlite with idempotent schema creation on open.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::ServerResult;
use crate::models::Item;

/// Thread-safe database wrapper
///
/// Cloning is cheap; every operation locks the underlying connection for
/// the duration of a single-row query, so concurrent requests never share
/// an in-flight session.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> ServerResult<Self> {
        let path = path.into();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&path)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };

        db.init_schema()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> ServerResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Create the items table if it does not exist. Safe to call repeatedly.
    fn init_schema(&self) -> ServerResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// List all items in insertion order
    pub fn list_items(&self) -> ServerResult<Vec<Item>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, text FROM items ORDER BY id")?;

        let items = stmt
            .query_map([], |row| {
                Ok(Item {
                    id: row.get(0)?,
                    text: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Get a single item by id
    pub fn get_item(&self, id: i64) -> ServerResult<Option<Item>> {
        let conn = self.conn.lock().unwrap();
        let item = conn
            .query_row("SELECT id, text FROM items WHERE id = ?", [id], |row| {
                Ok(Item {
                    id: row.get(0)?,
                    text: row.get(1)?,
                })
            })
            .optional()?;

        Ok(item)
    }

    /// Insert a new item, returning it with its assigned id
    pub fn insert_item(&self, text: &str) -> ServerResult<Item> {
        let conn = self.conn.lock().unwrap();
        conn.execute("INSERT INTO items (text) VALUES (?)", [text])?;

        Ok(Item {
            id: conn.last_insert_rowid(),
            text: text.to_string(),
        })
    }

    /// Replace an existing item's text, returning the updated item
    pub fn update_item(&self, id: i64, text: &str) -> ServerResult<Item> {
        let conn = self.conn.lock().unwrap();
        conn.execute("UPDATE items SET text = ? WHERE id = ?", params![text, id])?;

        Ok(Item {
            id,
            text: text.to_string(),
        })
    }

    /// Delete an item by id, returning whether a row was removed
    pub fn delete_item(&self, id: i64) -> ServerResult<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM items WHERE id = ?", [id])?;
        Ok(deleted > 0)
    }
}

// AUTOINCREMENT keeps deleted ids from ever being reassigned.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL
);
"#;
