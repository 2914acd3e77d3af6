pub mod initialize;
pub mod log;
pub mod pool;
pub mod sqlite;
pub mod warehouse;

pub use sqlite::SqliteWarehouse;
pub use warehouse::Warehouse;
