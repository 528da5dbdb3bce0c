pub mod cache;
pub mod dataset_reader;

pub use cache::{CacheStats, DatasetCache};
pub use dataset_reader::{load, DatasetReader};
