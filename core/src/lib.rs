pub mod api;
pub mod config;
pub mod error;
pub mod record;
pub mod runner;
pub mod sink;
