pub mod config;
pub mod error;
pub mod models;

pub use config::{AppConfig, OutputConfig};
pub use error::{ExitCode, ListmergeError, Result};
pub use models::*;
