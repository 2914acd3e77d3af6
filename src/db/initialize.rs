use crate::config::Config;
use crate::db::sqlite::quote_ident;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Registry of created datasets.
fn ensure_datasets_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS datasets (
            name       TEXT PRIMARY KEY,
            location   TEXT NOT NULL DEFAULT 'US',
            created_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Contact mapping table, keyed by contact id.
pub fn ensure_mapping_table(conn: &Connection, table: &str) -> AppResult<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {} (
            contact_id                 TEXT PRIMARY KEY,
            pow_id                     INTEGER,
            last_time_account_dir_comm TEXT,
            last_time_contact_dir_comm TEXT
        );",
        quote_ident(table)?
    ))?;
    Ok(())
}

/// Daily snapshot of CRM clients the worklist is drawn from.
fn ensure_clients_table(conn: &Connection, table: &str) -> AppResult<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {} (
            id              TEXT NOT NULL,
            last_visit_date TEXT,
            partition_date  TEXT NOT NULL
        );",
        quote_ident(table)?
    ))?;
    Ok(())
}

/// Out-of-band verification codes for CRM logins.
fn ensure_verification_table(conn: &Connection, table: &str) -> AppResult<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {} (
            code       TEXT NOT NULL,
            created_at TEXT
        );",
        quote_ident(table)?
    ))?;
    Ok(())
}

/// Initialize the warehouse database.
/// Every statement is idempotent, so this is safe on an existing file.
pub fn init_db(conn: &Connection, cfg: &Config) -> AppResult<()> {
    ensure_log_table(conn)?;
    ensure_datasets_table(conn)?;
    ensure_mapping_table(conn, &cfg.crm.mapping_table)?;
    ensure_clients_table(conn, &cfg.crm.clients_table)?;
    ensure_verification_table(conn, &cfg.crm.verification_table)?;
    Ok(())
}
