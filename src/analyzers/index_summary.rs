use serde::Serialize;

use crate::analyzers::change::percent_change;
use crate::analyzers::group_stats::GroupExtremes;
use crate::error::Result;
use crate::models::Table;
use crate::utils::constants::BASE_INDEX;
use crate::utils::format::format_signed_percent;

/// Headline figures for a single-series price index normalised to 100 at `base_year`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexSummary {
    pub base_year: i32,
    pub base_index: f64,
    pub current: f64,
    pub current_year: i32,
    pub highest: f64,
    pub highest_year: i32,
    pub lowest: f64,
    pub lowest_year: i32,
    pub observations: usize,
}

impl IndexSummary {
    /// Summarise every usable row of an already period-filtered index table
    pub fn from_table(table: &Table, base_year: i32) -> Result<Self> {
        let points: Vec<(i32, f64)> = table
            .records()
            .iter()
            .filter_map(|r| r.value_clean.map(|v| (r.year, v)))
            .collect();

        let extremes = GroupExtremes::from_points(table.origin().to_string(), points)?;

        Ok(Self {
            base_year,
            base_index: BASE_INDEX,
            current: extremes.latest,
            current_year: extremes.latest_year,
            highest: extremes.max,
            highest_year: extremes.year_of_max,
            lowest: extremes.min,
            lowest_year: extremes.year_of_min,
            observations: extremes.observations,
        })
    }

    /// Index points above (or below) the base
    pub fn change_from_base(&self) -> f64 {
        self.current - self.base_index
    }

    pub fn percent_vs_base(&self, value: f64) -> Result<f64> {
        percent_change(self.base_index, value)
    }

    pub fn total_change_percent(&self) -> Result<f64> {
        self.percent_vs_base(self.current)
    }

    pub fn summary(&self) -> Result<String> {
        let total = self.total_change_percent()?;
        let direction = if total > 0.0 { "higher" } else { "lower" };

        Ok(format!(
            "Current Index ({}): {:.1} ({:+.1} from base year)\n\
            Highest Index: {:.1} in {} ({} vs base)\n\
            Lowest Index: {:.1} in {} ({} vs base)\n\
            Total Change: {} since {} (prices {} than the {} baseline)",
            self.current_year,
            self.current,
            self.change_from_base(),
            self.highest,
            self.highest_year,
            format_signed_percent(self.percent_vs_base(self.highest)?),
            self.lowest,
            self.lowest_year,
            format_signed_percent(self.percent_vs_base(self.lowest)?),
            format_signed_percent(total),
            self.base_year,
            direction,
            self.base_year
        ))
    }
}
