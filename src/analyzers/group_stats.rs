use serde::Serialize;
use std::collections::HashMap;

use crate::analyzers::change::percent_change;
use crate::error::{AnalysisError, Result};
use crate::models::Table;

/// Latest/earliest values and extremes for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupExtremes {
    pub group: String,
    pub latest: f64,
    pub latest_year: i32,
    pub earliest: f64,
    pub earliest_year: i32,
    pub max: f64,
    pub year_of_max: i32,
    pub min: f64,
    pub year_of_min: i32,
    pub observations: usize,
}

impl GroupExtremes {
    /// Summarise `(year, value)` observations of one group.
    ///
    /// Points are stably sorted by year, so on a duplicated year the row that
    /// came first in the source wins, and extremes report the earliest year
    /// reaching them.
    pub(crate) fn from_points(group: String, mut points: Vec<(i32, f64)>) -> Result<Self> {
        if points.is_empty() {
            return Err(AnalysisError::EmptyGroup { group });
        }

        points.sort_by_key(|(year, _)| *year);

        let (earliest_year, earliest) = points[0];
        let latest_year = points[points.len() - 1].0;
        let latest = points
            .iter()
            .find(|(year, _)| *year == latest_year)
            .map(|(_, value)| *value)
            .unwrap_or(earliest);

        let (mut year_of_max, mut max) = points[0];
        let (mut year_of_min, mut min) = points[0];
        for &(year, value) in &points[1..] {
            if value > max {
                max = value;
                year_of_max = year;
            }
            if value < min {
                min = value;
                year_of_min = year;
            }
        }

        Ok(Self {
            group,
            latest,
            latest_year,
            earliest,
            earliest_year,
            max,
            year_of_max,
            min,
            year_of_min,
            observations: points.len(),
        })
    }

    /// Percent change from the earliest to the latest value
    pub fn growth_percent(&self) -> Result<f64> {
        percent_change(self.earliest, self.latest)
    }
}

/// Per-group extremes in order of first appearance in the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupExtremesReport {
    pub group_column: String,
    pub groups: Vec<GroupExtremes>,
}

impl GroupExtremesReport {
    pub fn get(&self, group: &str) -> Option<&GroupExtremes> {
        self.groups.iter().find(|g| g.group == group)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.group.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GroupExtremes> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a GroupExtremesReport {
    type Item = &'a GroupExtremes;
    type IntoIter = std::slice::Iter<'a, GroupExtremes>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Distinct values of `group_column`, in first-appearance order
pub fn distinct_groups(table: &Table, group_column: &str) -> Result<Vec<String>> {
    let index = table.column_index(group_column)?;
    let mut groups: Vec<String> = Vec::new();

    for record in table.records() {
        let key = record.field(index);
        if !groups.iter().any(|g| g == key) {
            groups.push(key.to_string());
        }
    }

    Ok(groups)
}

/// Latest, earliest, max and min of `value_column` for every group.
///
/// Rows whose value is missing are ignored. A group left with no values is
/// an [`AnalysisError::EmptyGroup`].
pub fn group_extremes(
    table: &Table,
    group_column: &str,
    value_column: &str,
) -> Result<GroupExtremesReport> {
    let group_index = table.column_index(group_column)?;
    let values = table.numeric_column(value_column)?;

    let mut order: Vec<&str> = Vec::new();
    let mut points: HashMap<&str, Vec<(i32, f64)>> = HashMap::new();

    for record in table.records() {
        let key = record.field(group_index);
        let bucket = points.entry(key).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });

        if let Some(value) = values.value(record) {
            bucket.push((record.year, value));
        }
    }

    let groups = order
        .into_iter()
        .map(|key| {
            let group_points = points.remove(key).unwrap_or_default();
            GroupExtremes::from_points(key.to_string(), group_points)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(GroupExtremesReport {
        group_column: group_column.to_string(),
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CleaningRule;
    use crate::readers::DatasetReader;
    use crate::utils::constants::VALUE_CLEAN_COLUMN;
    use pretty_assertions::assert_eq;

    fn table(rule: CleaningRule, csv: &str) -> Table {
        DatasetReader::new(rule)
            .load_from_bytes(csv.as_bytes(), "inline")
            .unwrap()
    }

    #[test]
    fn test_two_states() {
        let cropland = table(
            CleaningRule::CommaStripped,
            "State,Year,Value\n\
             OHIO,2013,\"4,000\"\n\
             OHIO,2025,\"9,000\"\n\
             INDIANA,2013,\"3,000\"\n\
             INDIANA,2025,\"6,000\"\n",
        );

        let report = group_extremes(&cropland, "State", VALUE_CLEAN_COLUMN).unwrap();
        assert_eq!(report.keys().collect::<Vec<_>>(), vec!["OHIO", "INDIANA"]);

        let ohio = report.get("OHIO").unwrap();
        assert_eq!(ohio.earliest, 4000.0);
        assert_eq!(ohio.latest, 9000.0);
        assert_eq!((ohio.max, ohio.year_of_max), (9000.0, 2025));
        assert_eq!((ohio.min, ohio.year_of_min), (4000.0, 2013));
        assert_eq!(ohio.growth_percent().unwrap(), 125.0);

        let indiana = report.get("INDIANA").unwrap();
        assert_eq!(indiana.earliest, 3000.0);
        assert_eq!(indiana.latest, 6000.0);
        assert_eq!((indiana.max, indiana.year_of_max), (6000.0, 2025));
        assert_eq!((indiana.min, indiana.year_of_min), (3000.0, 2013));
    }

    #[test]
    fn test_unsorted_rows_and_missing_values() {
        let prices = table(
            CleaningRule::Coercive,
            "Commodity,Year,Value\n\
             CORN,2024,(NA)\n\
             CORN,2022,6.54\n\
             CORN,2020,4.53\n\
             CORN,2023,4.55\n",
        );

        let report = group_extremes(&prices, "Commodity", VALUE_CLEAN_COLUMN).unwrap();
        let corn = report.get("CORN").unwrap();

        // 2024 is missing, so 2023 is the latest usable year
        assert_eq!((corn.latest_year, corn.latest), (2023, 4.55));
        assert_eq!((corn.earliest_year, corn.earliest), (2020, 4.53));
        assert_eq!((corn.year_of_max, corn.max), (2022, 6.54));
        assert_eq!(corn.observations, 3);
    }

    #[test]
    fn test_duplicate_year_first_row_wins() {
        let prices = table(
            CleaningRule::Coercive,
            "Commodity,Year,Value\n\
             WHEAT,2021,7.00\n\
             WHEAT,2024,5.50\n\
             WHEAT,2024,5.90\n\
             WHEAT,2021,7.00\n",
        );

        let wheat = group_extremes(&prices, "Commodity", VALUE_CLEAN_COLUMN)
            .unwrap()
            .get("WHEAT")
            .cloned()
            .unwrap();

        assert_eq!(wheat.latest, 5.50);
        assert_eq!(wheat.earliest, 7.00);
        // Max reached in 2021 twice; the first row is reported
        assert_eq!(wheat.year_of_max, 2021);
        assert_eq!(wheat.year_of_min, 2024);
    }

    #[test]
    fn test_all_missing_group_is_error() {
        let prices = table(
            CleaningRule::Coercive,
            "Commodity,Year,Value\n\
             CORN,2023,4.55\n\
             SOYBEANS,2023,(NA)\n\
             SOYBEANS,2024,(S)\n",
        );

        let err = group_extremes(&prices, "Commodity", VALUE_CLEAN_COLUMN).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyGroup { ref group } if group == "SOYBEANS"));
    }

    #[test]
    fn test_unknown_columns() {
        let prices = table(CleaningRule::Coercive, "Commodity,Year,Value\nCORN,2023,4.55\n");

        assert!(matches!(
            group_extremes(&prices, "State", VALUE_CLEAN_COLUMN),
            Err(AnalysisError::Schema { .. })
        ));
        assert!(matches!(
            group_extremes(&prices, "Commodity", "Price"),
            Err(AnalysisError::Schema { .. })
        ));
    }

    #[test]
    fn test_raw_value_column() {
        let prices = table(
            CleaningRule::Coercive,
            "Commodity,Year,Value,CV (%)\n\
             CORN,2023,4.55,1.2\n\
             CORN,2024,4.10,0.8\n",
        );

        let report = group_extremes(&prices, "Commodity", "CV (%)").unwrap();
        let corn = report.get("CORN").unwrap();

        assert_eq!(corn.latest, 0.8);
        assert_eq!(corn.max, 1.2);
    }

    #[test]
    fn test_distinct_groups() {
        let prices = table(
            CleaningRule::Coercive,
            "Commodity,Year,Value\nSOYBEANS,2023,12\nCORN,2023,4\nSOYBEANS,2024,11\n",
        );

        assert_eq!(
            distinct_groups(&prices, "Commodity").unwrap(),
            vec!["SOYBEANS".to_string(), "CORN".to_string()]
        );
    }
}
