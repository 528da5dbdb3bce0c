use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{info, warn};

use crate::analyzers::group_stats::{group_extremes, GroupExtremes};
use crate::analyzers::index_summary::IndexSummary;
use crate::analyzers::views::{latest_year, year_snapshot, SnapshotEntry};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::models::{CleaningRule, Table};
use crate::readers::DatasetCache;
use crate::utils::constants::{MISSING_DISPLAY, VALUE_CLEAN_COLUMN};
use crate::utils::format::format_currency;

/// How a grouped dataset's values are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueUnit {
    pub suffix: &'static str,
    pub decimals: usize,
}

pub const DOLLARS_PER_ACRE: ValueUnit = ValueUnit {
    suffix: "/acre",
    decimals: 0,
};

pub const DOLLARS_PER_BUSHEL: ValueUnit = ValueUnit {
    suffix: "/bu",
    decimals: 2,
};

impl ValueUnit {
    pub fn format(&self, value: f64) -> String {
        format!("{}{}", format_currency(value, self.decimals), self.suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMetric {
    #[serde(flatten)]
    pub extremes: GroupExtremes,
    /// `None` when the earliest value is zero
    pub growth_percent: Option<f64>,
}

/// Metrics and latest-year ranking for one grouped dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSection {
    pub title: String,
    pub group_column: String,
    pub unit: ValueUnit,
    pub rows: usize,
    pub missing_values: usize,
    pub latest_year: Option<i32>,
    pub metrics: Vec<GroupMetric>,
    pub ranking: Vec<SnapshotEntry>,
}

impl GroupSection {
    pub fn build(table: &Table, title: &str, group_column: &str, unit: ValueUnit) -> Result<Self> {
        let report = group_extremes(table, group_column, VALUE_CLEAN_COLUMN)?;

        let metrics = report
            .groups
            .into_iter()
            .map(|extremes| {
                let growth_percent = match extremes.growth_percent() {
                    Ok(growth) => Some(growth),
                    Err(e) => {
                        warn!("{} growth for {}: {}", title, extremes.group, e);
                        None
                    }
                };
                GroupMetric {
                    extremes,
                    growth_percent,
                }
            })
            .collect();

        let latest_year = latest_year(table);
        let ranking = match latest_year {
            Some(year) => year_snapshot(table, group_column, year)?,
            None => Vec::new(),
        };

        Ok(Self {
            title: title.to_string(),
            group_column: group_column.to_string(),
            unit,
            rows: table.len(),
            missing_values: table.missing_count(),
            latest_year,
            metrics,
            ranking,
        })
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            self.title.clone(),
            format!(
                "Rows: {} ({} missing values)",
                self.rows, self.missing_values
            ),
        ];

        for metric in &self.metrics {
            let e = &metric.extremes;
            let growth = metric
                .growth_percent
                .map(|g| format!("{:+.1}% since {}", g, e.earliest_year))
                .unwrap_or_else(|| MISSING_DISPLAY.to_string());

            lines.push(format!(
                "- {}: {} in {} ({}); high {} in {}, low {} in {}",
                e.group,
                self.unit.format(e.latest),
                e.latest_year,
                growth,
                self.unit.format(e.max),
                e.year_of_max,
                self.unit.format(e.min),
                e.year_of_min
            ));
        }

        if let Some(year) = self.latest_year {
            lines.push(format!("Rankings ({}):", year));
            for entry in &self.ranking {
                lines.push(format!(
                    "  {}. {} ({})",
                    entry.rank,
                    entry.group,
                    self.unit.format(entry.value)
                ));
            }
        }

        lines.join("\n")
    }
}

/// Everything the dashboard shows, computed from the three configured datasets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Local>,
    pub cropland: GroupSection,
    pub crop_prices: GroupSection,
    pub index: IndexSummary,
}

impl DashboardReport {
    pub fn build(config: &DashboardConfig, cache: &mut DatasetCache) -> Result<Self> {
        let cropland_table =
            cache.get_or_load(&config.resolve(&config.cropland.path), CleaningRule::CommaStripped)?;
        let cropland = GroupSection::build(
            &cropland_table,
            "Cropland Value by State",
            &config.cropland.group_column,
            DOLLARS_PER_ACRE,
        )?;

        let prices_table =
            cache.get_or_load(&config.resolve(&config.crop_prices.path), CleaningRule::Coercive)?;
        let crop_prices = GroupSection::build(
            &prices_table,
            "Crop Prices by Commodity",
            &config.crop_prices.group_column,
            DOLLARS_PER_BUSHEL,
        )?;

        let index_table = cache
            .get_or_load(&config.resolve(&config.index_pricing.path), CleaningRule::Coercive)?
            .filter_period(&config.index_pricing.period)?;
        let index = IndexSummary::from_table(&index_table, config.base_year)?;

        info!(
            "Built dashboard report: {} {} groups, {} {} groups, {} index years",
            cropland.metrics.len(),
            cropland.group_column,
            crop_prices.metrics.len(),
            crop_prices.group_column,
            index.observations
        );

        Ok(Self {
            generated_at: Local::now(),
            cropland,
            crop_prices,
            index,
        })
    }

    pub fn summary(&self) -> Result<String> {
        Ok(format!(
            "Agricultural Data Summary (generated {})\n\n{}\n\n{}\n\n\
            Food Commodities Price Index (Base Year {} = {:.0})\n{}",
            self.generated_at.format("%Y-%m-%d %H:%M"),
            self.cropland.summary(),
            self.crop_prices.summary(),
            self.index.base_year,
            self.index.base_index,
            self.index.summary()?
        ))
    }
}
