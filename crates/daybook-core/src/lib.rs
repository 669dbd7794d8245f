pub mod config;
pub mod constants;
pub mod content;
pub mod events;
pub mod filter_parser;
pub mod models;
pub mod ordering;
pub mod runtime;
pub mod stats;
pub mod store;
pub mod tracing_setup;
pub mod worker;
