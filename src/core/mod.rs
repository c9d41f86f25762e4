pub mod app;
pub mod auth;
pub mod calculator;
pub mod history;
pub mod local_storage;
pub mod log;
pub mod reports;
pub mod router;
pub mod state;
pub mod ticker;
pub mod tracker;
