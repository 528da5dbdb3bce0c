pub mod cleaning;
pub mod record;
pub mod table;

pub use cleaning::CleaningRule;
pub use record::Record;
pub use table::{NumericColumn, Table};
