//! `Warehouse` backed by a local SQLite file.
//!
//! Fully qualified ids (`project.dataset.table`) are used verbatim as quoted
//! SQLite table names; datasets are rows of the `datasets` registry.

use crate::config::Config;
use crate::core::payroll::schema::{ColumnType, column_type};
use crate::db::initialize::ensure_mapping_table;
use crate::db::pool::DbPool;
use crate::db::warehouse::Warehouse;
use crate::errors::{AppError, AppResult};
use crate::models::contact::{ContactEnrichment, MappingRow};
use crate::models::timesheet::{CellValue, TIMESHEET_COLUMNS, TIMESTAMP_FORMAT, TimesheetRecord};
use crate::utils::date::ISO_DATE;
use chrono::{Local, NaiveDate};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

/// Quote a table id for SQLite. Ids containing `"` are rejected.
pub fn quote_ident(name: &str) -> AppResult<String> {
    if name.trim().is_empty() || name.contains('"') {
        return Err(AppError::InvalidTableId(name.to_string()));
    }
    Ok(format!("\"{name}\""))
}

fn sql_type(column: &str) -> &'static str {
    match column_type(column) {
        ColumnType::String | ColumnType::Timestamp => "TEXT",
        ColumnType::Float => "REAL",
    }
}

fn cell_to_value(cell: CellValue) -> Value {
    match cell {
        CellValue::Text(Some(s)) => Value::Text(s),
        CellValue::Timestamp(Some(ts)) => Value::Text(ts.format(TIMESTAMP_FORMAT).to_string()),
        CellValue::Float(Some(f)) => Value::Real(f),
        CellValue::Text(None) | CellValue::Timestamp(None) | CellValue::Float(None) => Value::Null,
    }
}

pub struct SqliteWarehouse {
    pool: DbPool,
}

impl SqliteWarehouse {
    /// Open (and initialize) the warehouse file named in `cfg`.
    pub fn open(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::open(cfg)?,
        })
    }

    pub fn in_memory(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::in_memory(cfg)?,
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    fn load_staged(&self, staging: &str) -> AppResult<Vec<ContactEnrichment>> {
        let mut stmt = self.pool.conn.prepare(&format!(
            "SELECT contact_id, pow_id, last_time_account_dir_comm, last_time_contact_dir_comm
             FROM {}",
            quote_ident(staging)?
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(ContactEnrichment {
                contact_id: row.get(0)?,
                external_id: row.get(1)?,
                last_account_contact: row.get(2)?,
                last_contact_response: row.get(3)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}

impl Warehouse for SqliteWarehouse {
    fn table_exists(&mut self, table_id: &str) -> AppResult<bool> {
        let found: Option<i64> = self
            .pool
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
                [table_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn delete_table(&mut self, table_id: &str) -> AppResult<()> {
        if !self.table_exists(table_id)? {
            return Err(AppError::TableNotFound(table_id.to_string()));
        }
        self.pool
            .conn
            .execute_batch(&format!("DROP TABLE {};", quote_ident(table_id)?))?;
        Ok(())
    }

    fn ensure_dataset(&mut self, dataset: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT OR IGNORE INTO datasets (name, location, created_at) VALUES (?1, 'US', ?2)",
            params![dataset, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn load_timesheets(&mut self, table_id: &str, rows: &[TimesheetRecord]) -> AppResult<usize> {
        let table = quote_ident(table_id)?;

        let columns_ddl = TIMESHEET_COLUMNS
            .iter()
            .map(|c| format!("{c} {}", sql_type(c)))
            .collect::<Vec<_>>()
            .join(",\n    ");
        let placeholders = vec!["?"; TIMESHEET_COLUMNS.len()].join(", ");

        let tx = self.pool.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};
             CREATE TABLE {table} (\n    {columns_ddl}\n);"
        ))?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders})",
                TIMESHEET_COLUMNS.join(", ")
            ))?;
            for record in rows {
                let values: Vec<Value> = record.cells().into_iter().map(cell_to_value).collect();
                stmt.execute(params_from_iter(values))?;
            }
        }

        tx.commit()?;
        Ok(rows.len())
    }

    fn run_query(&mut self, sql: &str) -> AppResult<()> {
        self.pool.conn.execute_batch(sql)?;
        Ok(())
    }

    fn materialize_view(&mut self, view: &str, target: &str) -> AppResult<()> {
        if !self.table_exists(view)? {
            return Err(AppError::TableNotFound(view.to_string()));
        }
        let (view, target) = (quote_ident(view)?, quote_ident(target)?);

        let tx = self.pool.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {target};
             CREATE TABLE {target} AS SELECT * FROM {view};"
        ))?;
        tx.commit()?;
        Ok(())
    }

    fn fetch_worklist(
        &mut self,
        clients: &str,
        mapping: &str,
        partition: NaiveDate,
        limit: usize,
    ) -> AppResult<Vec<String>> {
        ensure_mapping_table(&self.pool.conn, mapping)?;

        let partition = partition.format(ISO_DATE).to_string();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = self.pool.conn.prepare(&format!(
            "SELECT r.id, MAX(r.last_visit_date) AS last_visit
             FROM {} r
             LEFT JOIN {} m ON m.contact_id = r.id
             WHERE r.partition_date = ?1
               AND (m.contact_id IS NULL OR m.pow_id IS NULL)
             GROUP BY r.id
             ORDER BY last_visit DESC
             LIMIT ?2",
            quote_ident(clients)?,
            quote_ident(mapping)?
        ))?;

        let rows = stmt.query_map(params![partition, limit], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn verification_code(&mut self, table: &str) -> AppResult<Option<String>> {
        let code = self
            .pool
            .conn
            .query_row(
                &format!("SELECT code FROM {} LIMIT 1", quote_ident(table)?),
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(code)
    }

    fn stage_contacts(&mut self, staging: &str, rows: &[ContactEnrichment]) -> AppResult<()> {
        let table = quote_ident(staging)?;

        let tx = self.pool.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};
             CREATE TABLE {table} (
                contact_id                 TEXT NOT NULL,
                pow_id                     TEXT,
                last_time_account_dir_comm TEXT,
                last_time_contact_dir_comm TEXT
             );"
        ))?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table}
                 (contact_id, pow_id, last_time_account_dir_comm, last_time_contact_dir_comm)
                 VALUES (?1, ?2, ?3, ?4)"
            ))?;
            for r in rows {
                stmt.execute(params![
                    r.contact_id,
                    r.external_id,
                    r.last_account_contact,
                    r.last_contact_response
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn merge_contacts(&mut self, mapping: &str, staging: &str) -> AppResult<usize> {
        ensure_mapping_table(&self.pool.conn, mapping)?;
        let staged = self.load_staged(staging)?;
        let table = quote_ident(mapping)?;

        let tx = self.pool.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table}
                 (contact_id, pow_id, last_time_account_dir_comm, last_time_contact_dir_comm)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(contact_id) DO UPDATE SET
                    pow_id = excluded.pow_id,
                    last_time_account_dir_comm = excluded.last_time_account_dir_comm,
                    last_time_contact_dir_comm = excluded.last_time_contact_dir_comm"
            ))?;

            for c in &staged {
                let row = MappingRow::from(c);
                stmt.execute(params![
                    row.contact_id,
                    row.external_id,
                    row.last_account_contact
                        .map(|d| d.format(ISO_DATE).to_string()),
                    row.last_contact_response
                        .map(|d| d.format(ISO_DATE).to_string()),
                ])?;
            }
        }
        tx.commit()?;

        Ok(staged.len())
    }
}
