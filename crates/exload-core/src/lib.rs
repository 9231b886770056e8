pub mod config;
pub mod logging;

pub mod fetch;
pub mod filename;
pub mod listing;
pub mod loader;
pub mod manifest;
pub mod resolve;
pub mod source;
