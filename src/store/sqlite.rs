use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{schema, CellRange, CellRef, StoreError, Worksheet};

/// Worksheet whose cells live in a SQLite file. Several worksheets can
/// share one file; each handle is bound to a single title.
pub(crate) struct SqliteWorksheet {
    conn: Connection,
    title: String,
}

impl SqliteWorksheet {
    pub(crate) fn open(path: &Path, title: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let mut sheet = Self {
            conn,
            title: title.to_string(),
        };
        sheet.migrate()?;
        sheet.register()?;
        tracing::debug!(path = %path.display(), title, "worksheet opened");
        Ok(sheet)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory(title: &str) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut sheet = Self {
            conn,
            title: title.to_string(),
        };
        sheet.migrate()?;
        sheet.register()?;
        Ok(sheet)
    }

    fn migrate(&mut self) -> Result<(), StoreError> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn register(&mut self) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO worksheets (title, created_at) VALUES (?1, ?2)",
            params![self.title, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

fn write_cell(
    conn: &Connection,
    sheet: &str,
    cell: CellRef,
    value: &str,
    now: &str,
) -> Result<(), StoreError> {
    if value.is_empty() {
        conn.execute(
            "DELETE FROM cells WHERE sheet = ?1 AND row = ?2 AND col = ?3",
            params![sheet, cell.row as i64, cell.col as i64],
        )?;
    } else {
        conn.execute(
            "INSERT INTO cells (sheet, row, col, value, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(sheet, row, col) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![sheet, cell.row as i64, cell.col as i64, value, now],
        )?;
    }
    Ok(())
}

impl Worksheet for SqliteWorksheet {
    fn title(&self) -> &str {
        &self.title
    }

    fn acell(&self, cell: CellRef) -> Result<Option<String>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM cells WHERE sheet = ?1 AND row = ?2 AND col = ?3",
                params![self.title, cell.row as i64, cell.col as i64],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn update_acell(&mut self, cell: CellRef, value: &str) -> Result<(), StoreError> {
        let now = chrono::Utc::now().to_rfc3339();
        write_cell(&self.conn, &self.title, cell, value, &now)
    }

    fn get_all_values(&self) -> Result<Vec<Vec<String>>, StoreError> {
        let (max_row, max_col): (Option<i64>, Option<i64>) = self.conn.query_row(
            "SELECT MAX(row), MAX(col) FROM cells WHERE sheet = ?1",
            params![self.title],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let (Some(max_row), Some(max_col)) = (max_row, max_col) else {
            return Ok(Vec::new());
        };

        let mut grid = vec![vec![String::new(); max_col as usize]; max_row as usize];
        let mut stmt = self
            .conn
            .prepare("SELECT row, col, value FROM cells WHERE sheet = ?1")?;
        let cells = stmt.query_map(params![self.title], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        for cell in cells {
            let (r, c, value) = cell?;
            if let Some(slot) = grid
                .get_mut(r as usize - 1)
                .and_then(|line| line.get_mut(c as usize - 1))
            {
                *slot = value;
            }
        }
        Ok(grid)
    }

    fn find(&self, query: &str) -> Result<Option<CellRef>, StoreError> {
        let found: Option<(i64, i64)> = self
            .conn
            .query_row(
                "SELECT row, col FROM cells WHERE sheet = ?1 AND value = ?2 ORDER BY row, col LIMIT 1",
                params![self.title, query],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(found.map(|(r, c)| CellRef::new(r as usize, c as usize)))
    }

    fn update_range(&mut self, range: CellRange, values: &[Vec<String>]) -> Result<(), StoreError> {
        if values.len() > range.rows() || values.iter().any(|v| v.len() > range.cols()) {
            return Err(StoreError::RangeMismatch {
                range: range.to_string(),
                rows: values.len(),
                cols: values.iter().map(Vec::len).max().unwrap_or(0),
            });
        }

        let now = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        for (i, line) in values.iter().enumerate() {
            for (j, value) in line.iter().enumerate() {
                let cell = CellRef::new(range.start.row + i, range.start.col + j);
                write_cell(&tx, &self.title, cell, value, &now)?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
