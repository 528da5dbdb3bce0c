pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod readers;
pub mod utils;

pub use error::{AnalysisError, Result};
pub use models::{CleaningRule, Record, Table};
pub use readers::{load, DatasetCache, DatasetReader};
