//! Warehouse contract consumed by both pipelines.

use crate::errors::AppResult;
use crate::models::contact::ContactEnrichment;
use crate::models::timesheet::TimesheetRecord;
use chrono::NaiveDate;

pub trait Warehouse {
    /// `true` when `table_id` exists (get-table).
    fn table_exists(&mut self, table_id: &str) -> AppResult<bool>;

    fn delete_table(&mut self, table_id: &str) -> AppResult<()>;

    /// Create `dataset` when it does not exist yet.
    fn ensure_dataset(&mut self, dataset: &str) -> AppResult<()>;

    /// Replace the content of `table_id` with `rows` (write-truncate).
    /// Returns the number of rows loaded.
    fn load_timesheets(&mut self, table_id: &str, rows: &[TimesheetRecord]) -> AppResult<usize>;

    /// Run a statement in the warehouse dialect.
    fn run_query(&mut self, sql: &str) -> AppResult<()>;

    /// Rebuild `target` as a table snapshot of `view`.
    fn materialize_view(&mut self, view: &str, target: &str) -> AppResult<()> {
        self.run_query(&format!(
            "CREATE OR REPLACE TABLE `{target}` AS SELECT * FROM `{view}`"
        ))
    }

    /// Contact ids lacking an external id: taken from the `partition`
    /// snapshot of `clients`, most recently visited first, at most `limit`.
    fn fetch_worklist(
        &mut self,
        clients: &str,
        mapping: &str,
        partition: NaiveDate,
        limit: usize,
    ) -> AppResult<Vec<String>>;

    /// First verification code in `table`, if any.
    fn verification_code(&mut self, table: &str) -> AppResult<Option<String>>;

    /// Replace the staging table with `rows`.
    fn stage_contacts(&mut self, staging: &str, rows: &[ContactEnrichment]) -> AppResult<()>;

    /// Upsert staged rows into `mapping` keyed by contact id: update the
    /// external id and dates on match, insert otherwise. Returns the number
    /// of rows merged.
    fn merge_contacts(&mut self, mapping: &str, staging: &str) -> AppResult<usize>;
}
