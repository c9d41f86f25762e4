pub mod aggregate;
pub mod totals;
