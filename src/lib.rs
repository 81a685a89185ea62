//! tabclean - Automated cleaning of tabular data
//!
//! Reads CSV and Excel files, tidies column names and cell text, infers date
//! and numeric columns, prunes empty columns, duplicate rows and incomplete
//! rows, and writes the result as CSV.

pub mod batch;
pub mod clean;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;

pub use clean::{clean, clean_with_stats, CleanStats};
pub use config::Config;
pub use error::CleanError;
pub use model::Table;
