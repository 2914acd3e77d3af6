//! SQLite connection holder shared by the warehouse and the log commands.

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// How long a statement waits on a locked database file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database named in `cfg` with its bookkeeping tables in place.
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let conn = Connection::open(Path::new(&cfg.database))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Self::initialized(conn, cfg)
    }

    pub fn in_memory(cfg: &Config) -> AppResult<Self> {
        Self::initialized(Connection::open_in_memory()?, cfg)
    }

    fn initialized(conn: Connection, cfg: &Config) -> AppResult<Self> {
        init_db(&conn, cfg)?;
        Ok(Self { conn })
    }
}
