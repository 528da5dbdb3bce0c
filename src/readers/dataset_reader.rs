use crate::error::{AnalysisError, Result};
use crate::models::{CleaningRule, Record, Table};
use crate::utils::constants::{DEFAULT_DELIMITER, VALUE_COLUMN, YEAR_COLUMN};
use std::path::Path;
use tracing::{debug, info};

pub struct DatasetReader {
    rule: CleaningRule,
    delimiter: u8,
}

impl DatasetReader {
    pub fn new(rule: CleaningRule) -> Self {
        Self {
            rule,
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read a delimited file with a header row into a cleaned [`Table`]
    pub fn load(&self, path: &Path) -> Result<Table> {
        let bytes = std::fs::read(path)?;
        let table = self.load_from_bytes(&bytes, &path.display().to_string())?;

        info!(
            "Loaded {} rows from {} ({} rule, {} missing values)",
            table.len(),
            path.display(),
            self.rule,
            table.missing_count()
        );

        Ok(table)
    }

    /// Parse an in-memory export. `origin` names the data in errors.
    pub fn load_from_bytes(&self, bytes: &[u8], origin: &str) -> Result<Table> {
        // Sniffs a UTF-8/UTF-16 BOM, otherwise decodes as UTF-8
        let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
        if had_errors {
            return Err(AnalysisError::InvalidFormat(format!(
                "{} is not valid {} text",
                origin,
                encoding.name()
            )));
        }
        debug!("Decoded {} as {}", origin, encoding.name());

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let schema_error = |column: &str| AnalysisError::Schema {
            column: column.to_string(),
            origin: origin.to_string(),
        };
        let year_index = headers
            .iter()
            .position(|h| h == YEAR_COLUMN)
            .ok_or_else(|| schema_error(YEAR_COLUMN))?;
        let value_index = headers
            .iter()
            .position(|h| h == VALUE_COLUMN)
            .ok_or_else(|| schema_error(VALUE_COLUMN))?;

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let row = index + 1;
            let fields: Vec<String> = result?.iter().map(|f| f.to_string()).collect();

            let year = self.parse_year(&fields[year_index], row, origin)?;
            let value_clean = self.parse_value(&fields[value_index], row, origin)?;

            records.push(Record::new(row, fields, year, value_clean));
        }

        Table::new(origin, self.rule, headers, records)
    }

    /// Year conversion is never coercive
    fn parse_year(&self, raw: &str, row: usize, origin: &str) -> Result<i32> {
        raw.trim().parse::<i32>().map_err(|_| AnalysisError::Parse {
            origin: origin.to_string(),
            row,
            column: YEAR_COLUMN.to_string(),
            value: raw.to_string(),
            reason: "is not an integer year".to_string(),
        })
    }

    fn parse_value(&self, raw: &str, row: usize, origin: &str) -> Result<Option<f64>> {
        self.rule.clean(raw).map_err(|reason| AnalysisError::Parse {
            origin: origin.to_string(),
            row,
            column: VALUE_COLUMN.to_string(),
            value: raw.to_string(),
            reason,
        })
    }
}

/// Load `path` with `rule` using the default delimiter
pub fn load(path: &Path, rule: CleaningRule) -> Result<Table> {
    DatasetReader::new(rule).load(path)
}
