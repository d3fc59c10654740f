//! Database sink backed by SQLite.
//!
//! Every formatted line becomes one row in a configured table, stored in a
//! single text column. The insert is prepared once when the sink is built and
//! kept in the connection's statement cache, so each write reuses it.

use crate::config::Properties;
use crate::error::{LoggerError, Result, SinkError};
use crate::sinks::{BackendKind, unavailable};
use rusqlite::Connection;

/// Database file to open; `:memory:` opens a private in-memory database.
pub const DB_CONNECT_PATH: &str = "db.connect.path";

/// Table receiving the log rows.
pub const DB_SQL_TABLE: &str = "db.sql.table";

/// Text column receiving the formatted line.
pub const DB_SQL_VAL_COLUMN: &str = "db.sql.val.column";

#[derive(Debug)]
pub struct DatabaseSink {
    conn: Connection,
    insert_sql: String,
}

impl DatabaseSink {
    /// Opens the database at `path` and prepares the insert.
    ///
    /// # Arguments
    /// * `path` - SQLite file path, or `:memory:`
    /// * `table` - Target table; must already exist
    /// * `column` - Text column of `table` to write into
    pub fn open(path: &str, table: &str, column: &str) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| unavailable(BackendKind::Database, e))?;
        Self::with_connection(conn, table, column)
    }

    /// Uses an existing connection. Table and column are validated as plain
    /// identifiers since they are spliced into the statement text.
    pub fn with_connection(conn: Connection, table: &str, column: &str) -> Result<Self> {
        check_identifier(DB_SQL_TABLE, table)?;
        check_identifier(DB_SQL_VAL_COLUMN, column)?;

        let insert_sql = format!("INSERT INTO {} ({}) VALUES (?1)", table, column);

        // Prepare now so a missing table fails construction, and seed the cache.
        conn.prepare_cached(&insert_sql)
            .map_err(|e| unavailable(BackendKind::Database, e))?;

        Ok(Self { conn, insert_sql })
    }

    pub fn from_properties(properties: &Properties) -> Result<Self> {
        let path = properties.require(DB_CONNECT_PATH)?;
        let table = properties.require(DB_SQL_TABLE)?;
        let column = properties.require(DB_SQL_VAL_COLUMN)?;
        Self::open(path, table.trim(), column.trim())
    }

    /// The underlying connection, e.g. to read rows back.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn insert_sql(&self) -> &str {
        &self.insert_sql
    }

    pub fn write(&mut self, line: &str) -> std::result::Result<(), SinkError> {
        let mut stmt = self.conn.prepare_cached(&self.insert_sql)?;
        stmt.execute([line])?;
        Ok(())
    }
}

/// Accepts `name` or `schema.name`, where each part is `[A-Za-z_][A-Za-z0-9_]*`.
fn check_identifier(key: &str, value: &str) -> Result<()> {
    let valid_part = |part: &str| {
        let mut chars = part.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };

    if !value.is_empty() && value.split('.').all(valid_part) {
        Ok(())
    } else {
        Err(LoggerError::InvalidConfiguration {
            key: key.to_string(),
            reason: format!("'{}' is not a valid SQL identifier", value),
        })
    }
}
