pub mod command;
pub mod config;
pub mod logging;
pub mod sink;
pub mod source;
pub mod version;
