pub mod date;
pub mod numeric;
pub mod path;
pub mod time;

pub use numeric::{parse_currency, parse_number};
