pub mod break_entry;
pub mod break_kind;
pub mod role;
pub mod status;
pub mod user;
pub mod work_session;
