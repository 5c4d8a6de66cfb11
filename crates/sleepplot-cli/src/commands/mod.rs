pub mod auth;
pub mod config;
pub mod fetch;
pub mod plot;
pub mod table;
