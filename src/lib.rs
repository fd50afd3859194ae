pub mod auth;
pub mod commit;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
