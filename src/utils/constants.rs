/// Column names shared by the USDA exports
pub const YEAR_COLUMN: &str = "Year";
pub const VALUE_COLUMN: &str = "Value";
pub const VALUE_CLEAN_COLUMN: &str = "Value_Clean";
pub const PERIOD_COLUMN: &str = "Period";
pub const STATE_COLUMN: &str = "State";
pub const COMMODITY_COLUMN: &str = "Commodity";

/// Period literal marking annual rows in the index export
pub const ANNUAL_PERIOD: &str = "YEAR";

/// Price index reference point
pub const DEFAULT_BASE_YEAR: i32 = 2011;
pub const BASE_INDEX: f64 = 100.0;

/// Parsing
pub const THOUSANDS_SEPARATOR: char = ',';
pub const DEFAULT_DELIMITER: char = ',';

/// Default source file names
pub const CROPLAND_FILE: &str = "Cropland Value.csv";
pub const CROP_PRICES_FILE: &str = "Crop Prices.csv";
pub const INDEX_PRICING_FILE: &str = "Index Pricing.csv";

/// Configuration
pub const DEFAULT_CONFIG_FILE: &str = "agdata.toml";
pub const ENV_PREFIX: &str = "AGDATA";

/// Rendering
pub const MISSING_DISPLAY: &str = "n/a";
