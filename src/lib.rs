pub mod concurrency;
pub mod config;
pub mod http;
