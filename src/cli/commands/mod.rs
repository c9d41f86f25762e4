pub mod clock;
pub mod config;
pub mod del;
pub mod edit;
pub mod history;
pub mod init;
pub mod log;
pub mod login;
pub mod logout;
pub mod password;
pub mod pause;
pub mod profile;
pub mod register;
pub mod report;
pub mod status;
pub mod users;
