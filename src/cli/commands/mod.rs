pub mod config;
pub mod init;
pub mod invoke;
pub mod log;
pub mod reshape;
pub mod scrape;
pub mod sync;
pub mod validate;
