//! SQLite schema reflection via `pragma_table_info`

use super::{ColumnDescriptor, SchemaSource, TableDescriptor};
use crate::error::{GenError, Result};
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;

pub struct SqliteSchema {
    conn: Connection,
}

impl SqliteSchema {
    /// Open an existing database file read-only
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GenError::Connection(format!(
                "SQLite database does not exist: {}",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| GenError::Connection(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Wrap an already-open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn table_exists(&self, table_name: &str) -> rusqlite::Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            params![table_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn read_columns(&self, table_name: &str) -> rusqlite::Result<Vec<ColumnDescriptor>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid",
        )?;
        let rows = stmt.query_map(params![table_name], |row| {
            let name: String = row.get(0)?;
            let native: String = row.get(1)?;
            let not_null: i64 = row.get(2)?;
            let default: Option<String> = row.get(3)?;
            let pk: i64 = row.get(4)?;

            let mut column = ColumnDescriptor::from_native(name, &native);
            column.primary_key = pk > 0;
            column.nullable = not_null == 0 && pk == 0;
            column.default = default;
            Ok(column)
        })?;
        let columns = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(columns)
    }
}

impl SchemaSource for SqliteSchema {
    fn describe_table(&self, table_name: &str) -> Result<TableDescriptor> {
        let exists = self
            .table_exists(table_name)
            .map_err(|e| GenError::Connection(e.to_string()))?;
        if !exists {
            return Err(GenError::TableNotFound(table_name.to_string()));
        }

        let columns = self
            .read_columns(table_name)
            .map_err(|e| GenError::Connection(e.to_string()))?;
        log::debug!("Reflected {} column(s) from '{}'", columns.len(), table_name);
        Ok(TableDescriptor::new(table_name, columns))
    }
}
