//! Application module
//!
//! Binary-side concerns: runtime configuration, logging setup, fatal error
//! handling, and loading submissions from disk.

pub mod config;
pub mod error_handling;
pub mod input;
pub mod logging;

pub use config::AppConfig;
pub use error_handling::handle_fatal_error;
pub use input::{load_record, parse_evaluation_date};
pub use logging::init_logging;
