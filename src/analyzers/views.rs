use prettytable::{format, Cell, Row, Table as PrettyTable};
use serde::Serialize;
use std::cmp::Ordering;

use crate::error::Result;
use crate::models::{Record, Table};
use crate::utils::constants::{MISSING_DISPLAY, VALUE_CLEAN_COLUMN, YEAR_COLUMN};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotEntry {
    pub rank: usize,
    pub group: String,
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: Option<f64>,
}

/// Column projection of a table, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Highest year present in the table
pub fn latest_year(table: &Table) -> Option<i32> {
    table.records().iter().map(|r| r.year).max()
}

/// Usable values for `year`, ranked from highest to lowest
pub fn year_snapshot(table: &Table, group_column: &str, year: i32) -> Result<Vec<SnapshotEntry>> {
    let index = table.column_index(group_column)?;

    let mut entries: Vec<(String, f64)> = table
        .records()
        .iter()
        .filter(|r| r.year == year)
        .filter_map(|r| r.value_clean.map(|v| (r.field(index).to_string(), v)))
        .collect();

    entries.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(i, (group, value))| SnapshotEntry {
            rank: i + 1,
            group,
            year,
            value,
        })
        .collect())
}

/// Year-ordered points of one group; missing values stay as gaps
pub fn group_series(table: &Table, group_column: &str, group: &str) -> Result<Vec<SeriesPoint>> {
    let index = table.column_index(group_column)?;

    let mut points: Vec<SeriesPoint> = table
        .records()
        .iter()
        .filter(|r| r.field(index) == group)
        .map(|r| SeriesPoint {
            year: r.year,
            value: r.value_clean,
        })
        .collect();

    points.sort_by_key(|p| p.year);
    Ok(points)
}

#[derive(Clone, Copy)]
enum ViewColumn {
    Year,
    Clean,
    Field(usize),
}

impl ViewColumn {
    fn resolve(table: &Table, name: &str) -> Result<Self> {
        match name {
            VALUE_CLEAN_COLUMN => Ok(ViewColumn::Clean),
            YEAR_COLUMN => table.column_index(name).map(|_| ViewColumn::Year),
            _ => table.column_index(name).map(ViewColumn::Field),
        }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            ViewColumn::Year => a.year.cmp(&b.year),
            ViewColumn::Clean => match (a.value_clean, b.value_clean) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            ViewColumn::Field(index) => a.field(*index).cmp(b.field(*index)),
        }
    }

    fn render(&self, record: &Record) -> String {
        match self {
            ViewColumn::Year => record.year.to_string(),
            ViewColumn::Clean => record
                .value_clean
                .map(|v| v.to_string())
                .unwrap_or_else(|| MISSING_DISPLAY.to_string()),
            ViewColumn::Field(index) => record.field(*index).to_string(),
        }
    }
}

/// Project `columns` and sort rows by `sort_by` (Year numerically, text otherwise)
pub fn raw_view(table: &Table, columns: &[&str], sort_by: &[&str]) -> Result<RawView> {
    let projection = columns
        .iter()
        .map(|c| ViewColumn::resolve(table, c))
        .collect::<Result<Vec<_>>>()?;
    let ordering = sort_by
        .iter()
        .map(|c| ViewColumn::resolve(table, c))
        .collect::<Result<Vec<_>>>()?;

    let mut records: Vec<&Record> = table.records().iter().collect();
    records.sort_by(|a, b| {
        ordering
            .iter()
            .map(|column| column.compare(a, b))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    let rows: Vec<Vec<String>> = records
        .into_iter()
        .map(|record| {
            projection
                .iter()
                .map(|column| column.render(record))
                .collect()
        })
        .collect();

    Ok(RawView {
        headers: columns.iter().map(|c| c.to_string()).collect(),
        rows,
    })
}

impl RawView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text table of the first `limit` rows (all when zero)
    pub fn render(&self, limit: usize) -> String {
        let shown = if limit == 0 {
            self.rows.len()
        } else {
            limit.min(self.rows.len())
        };

        let mut table = PrettyTable::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.set_titles(Row::new(self.headers.iter().map(|h| Cell::new(h)).collect()));
        for row in &self.rows[..shown] {
            table.add_row(Row::new(row.iter().map(|cell| Cell::new(cell)).collect()));
        }

        let mut text = table.to_string();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        if shown < self.rows.len() {
            text.push_str(&format!("... {} more rows\n", self.rows.len() - shown));
        }

        text
    }
}
