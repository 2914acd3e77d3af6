pub mod auth;
pub mod details;
pub mod scrape;

pub use scrape::{ScrapeDriver, ScrapeSummary};
