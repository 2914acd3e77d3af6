use crate::browser::Browser;
use crate::config::CrmConfig;
use crate::core::crm::auth::login;
use crate::core::crm::details::scrape_contact;
use crate::core::observer::RunObserver;
use crate::db::Warehouse;
use crate::errors::{AppError, AppResult};
use crate::models::contact::ContactEnrichment;
use crate::ui::messages::{error, info, progress, success, warning};
use crate::utils::date::today_at;
use crate::utils::time::format_elapsed;
use chrono::{Local, TimeDelta};

/// Totals of one scrape run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub worklist: usize,
    pub merged: usize,
    pub batches: usize,
    /// Contact ids skipped because their page could not be scraped.
    pub skipped: Vec<String>,
}

impl ScrapeSummary {
    pub fn render(&self) -> String {
        format!("Processed {} records successfully", self.merged)
    }
}

/// CRM scrape: login → worklist → per-contact details → batched merge.
pub struct ScrapeDriver<'a> {
    cfg: &'a CrmConfig,
    browser: &'a mut dyn Browser,
    warehouse: &'a mut dyn Warehouse,
    observer: &'a mut dyn RunObserver,
}

impl<'a> ScrapeDriver<'a> {
    pub fn new(
        cfg: &'a CrmConfig,
        browser: &'a mut dyn Browser,
        warehouse: &'a mut dyn Warehouse,
        observer: &'a mut dyn RunObserver,
    ) -> Self {
        Self {
            cfg,
            browser,
            warehouse,
            observer,
        }
    }

    /// Run the whole scrape. The browser is quit on every path.
    pub fn run(&mut self) -> AppResult<ScrapeSummary> {
        let started = Local::now();
        info(format!("Starting job at: {started}"));

        let result = self.scrape_all();

        if let Err(e) = self.browser.quit() {
            warning(format!("Error closing browser: {e}"));
        }

        let ended = Local::now();
        info(format!("Ending job at: {ended}"));
        info(format!("Total runtime: {}", format_elapsed(ended - started)));

        if let Err(e) = &result {
            error(format!("Error in scrape run: {e}"));
        }
        result
    }

    fn scrape_all(&mut self) -> AppResult<ScrapeSummary> {
        let partition = today_at(self.cfg.utc_offset_hours)
            .map(|d| d - TimeDelta::days(1))
            .ok_or_else(|| {
                AppError::Config(format!(
                    "crm.utc_offset_hours out of range: {:?}",
                    self.cfg.utc_offset_hours
                ))
            })?;

        login(&mut *self.browser, &mut *self.warehouse, self.cfg)?;

        let ids = self.warehouse.fetch_worklist(
            &self.cfg.clients_table,
            &self.cfg.mapping_table,
            partition,
            self.cfg.worklist_limit,
        )?;
        info(format!("Total contacts to process: {}", ids.len()));

        let batch_size = self.cfg.batch_size.max(1);
        let mut summary = ScrapeSummary {
            worklist: ids.len(),
            ..ScrapeSummary::default()
        };
        let mut pending: Vec<ContactEnrichment> = Vec::new();

        for (index, contact_id) in ids.iter().enumerate().map(|(i, id)| (i + 1, id)) {
            match scrape_contact(&mut *self.browser, self.cfg, contact_id) {
                Ok(record) => pending.push(record),
                Err(e) => {
                    error(format!("Error processing contact {contact_id}: {e}"));
                    summary.skipped.push(contact_id.clone());
                    continue;
                }
            }

            if index % batch_size == 0 {
                progress(index, ids.len(), "Processing batch");
                // a failed mid-run flush keeps its rows for the next one
                match self.flush(&pending) {
                    Ok(n) => {
                        summary.merged += n;
                        summary.batches += 1;
                        success(format!(
                            "Uploaded {n} records. Total records processed: {}",
                            summary.merged
                        ));
                        pending.clear();
                    }
                    Err(e) => error(format!("Error merging batch at contact {contact_id}: {e}")),
                }
            }
        }

        if !pending.is_empty() {
            let n = self.flush(&pending)?;
            summary.merged += n;
            summary.batches += 1;
            success(format!("Final batch uploaded: {n} records"));
            info(format!("Total records processed: {}", summary.merged));
        }

        Ok(summary)
    }

    /// Stage `rows` and merge them into the mapping table.
    fn flush(&mut self, rows: &[ContactEnrichment]) -> AppResult<usize> {
        self.warehouse.stage_contacts(&self.cfg.staging_table, rows)?;
        let merged = self
            .warehouse
            .merge_contacts(&self.cfg.mapping_table, &self.cfg.staging_table)?;
        info("Merge completed successfully");
        self.observer.record(
            "merge",
            &self.cfg.mapping_table,
            &format!("Merged {merged} contact records"),
        );
        Ok(merged)
    }
}
