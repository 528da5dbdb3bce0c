pub mod change;
pub mod dashboard;
pub mod group_stats;
pub mod index_summary;
pub mod views;

pub use change::percent_change;
pub use dashboard::{DashboardReport, GroupMetric, GroupSection, ValueUnit};
pub use group_stats::{distinct_groups, group_extremes, GroupExtremes, GroupExtremesReport};
pub use index_summary::IndexSummary;
pub use views::{
    group_series, latest_year, raw_view, year_snapshot, RawView, SeriesPoint, SnapshotEntry,
};
