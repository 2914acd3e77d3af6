pub mod handler;
pub mod reshape;
pub mod schema;
pub mod sync;
pub mod validator;

pub use reshape::{reshape_file, reshape_str};
pub use sync::SyncDriver;
pub use validator::{table_id_from_filename, validate_date_range};
