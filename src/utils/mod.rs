pub mod constants;
pub mod format;
pub mod progress;

pub use constants::*;
pub use format::{format_currency, format_signed_percent, format_thousands};
pub use progress::ProgressReporter;
