pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;
pub mod validation;

pub use formatting::{format_duration, format_duration_human};
pub use time::calculate_duration;
