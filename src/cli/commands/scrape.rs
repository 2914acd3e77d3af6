use crate::browser::{BrowserSettings, WebDriverSession};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::crm::ScrapeDriver;
use crate::core::observer::EventLog;
use crate::db::SqliteWarehouse;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success, warning};

/// Handle the `scrape` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scrape { webdriver } = cmd {
        header("CRM contact scrape");

        let settings = BrowserSettings::from_env();
        let url = webdriver.as_deref().unwrap_or(&cfg.crm.webdriver_url);
        info(format!(
            "Starting browser session at {url} (headless: {}, cloud: {})",
            settings.headless, settings.cloud
        ));

        let mut warehouse = SqliteWarehouse::open(cfg)?;
        let mut browser = WebDriverSession::start(url, &settings)?;
        let mut events = EventLog::new();

        let result =
            ScrapeDriver::new(&cfg.crm, &mut browser, &mut warehouse, &mut events).run();

        events.flush_to(warehouse.conn());

        let summary = result?;
        if let Err(e) = ttlog(warehouse.conn(), "scrape", &cfg.crm.mapping_table, &summary.render())
        {
            warning(format!("Failed to write internal log: {e}"));
        }
        success(summary.render());
    }
    Ok(())
}
