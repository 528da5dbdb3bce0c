use serde::{Deserialize, Serialize};

/// One data row of a dataset.
///
/// `fields` holds every raw cell in header order, so the original `Value`
/// text is kept exactly as read. `year` and `value_clean` are the parsed forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub row: usize,
    pub fields: Vec<String>,
    pub year: i32,
    pub value_clean: Option<f64>,
}

impl Record {
    pub fn new(row: usize, fields: Vec<String>, year: i32, value_clean: Option<f64>) -> Self {
        Self {
            row,
            fields,
            year,
            value_clean,
        }
    }

    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn has_value(&self) -> bool {
        self.value_clean.is_some()
    }
}
