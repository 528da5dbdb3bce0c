use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::models::{CleaningRule, Record};
use crate::utils::constants::{PERIOD_COLUMN, VALUE_CLEAN_COLUMN, VALUE_COLUMN, YEAR_COLUMN};

/// An immutable dataset loaded from one delimited source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    origin: String,
    rule: CleaningRule,
    headers: Vec<String>,
    records: Vec<Record>,
}

/// A numeric view over one column of a [`Table`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    /// The derived `Value_Clean` column
    Clean,
    /// Any other column, parsed per cell with missing on failure
    Raw(usize),
}

impl NumericColumn {
    pub fn value(&self, record: &Record) -> Option<f64> {
        match self {
            NumericColumn::Clean => record.value_clean,
            NumericColumn::Raw(index) => CleaningRule::Coercive
                .clean(record.field(*index))
                .ok()
                .flatten(),
        }
    }
}

impl Table {
    /// Build a table, checking that the columns every dataset relies on exist
    pub fn new(
        origin: impl Into<String>,
        rule: CleaningRule,
        headers: Vec<String>,
        records: Vec<Record>,
    ) -> Result<Self> {
        let table = Self {
            origin: origin.into(),
            rule,
            headers,
            records,
        };

        table.column_index(YEAR_COLUMN)?;
        table.column_index(VALUE_COLUMN)?;

        Ok(table)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn rule(&self) -> CleaningRule {
        self.rule
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a raw column in each record's fields
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| AnalysisError::Schema {
                column: name.to_string(),
                origin: self.origin.clone(),
            })
    }

    /// Resolve a column for numeric aggregation
    pub fn numeric_column(&self, name: &str) -> Result<NumericColumn> {
        if name == VALUE_CLEAN_COLUMN {
            Ok(NumericColumn::Clean)
        } else {
            self.column_index(name).map(NumericColumn::Raw)
        }
    }

    /// Raw text of `column` for a record of this table
    pub fn field<'a>(&self, record: &'a Record, column: &str) -> Result<&'a str> {
        let index = self.column_index(column)?;
        Ok(record.field(index))
    }

    /// Number of rows whose `Value_Clean` is the missing marker
    pub fn missing_count(&self) -> usize {
        self.records.iter().filter(|r| !r.has_value()).count()
    }

    /// Keep only rows whose `Period` equals `period`, in their original order
    pub fn filter_period(&self, period: &str) -> Result<Table> {
        let index = self.column_index(PERIOD_COLUMN)?;

        let records = self
            .records
            .iter()
            .filter(|r| r.field(index) == period)
            .cloned()
            .collect();

        Ok(Table {
            origin: self.origin.clone(),
            rule: self.rule,
            headers: self.headers.clone(),
            records,
        })
    }
}
