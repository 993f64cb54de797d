//! Financial aggregation and derived metrics for the dashboard.
//!
//! Everything here is pure and synchronous: callers hand in already fetched
//! rows and get freshly allocated results back.

pub mod coerce;
pub mod aggregator;
pub mod bucketer;
pub mod summary;
pub mod table;

pub use aggregator::aggregate_projects;
pub use bucketer::normalize_monthly;
pub use summary::build_dashboard_stats;
pub use table::{apply_query, join_projects, ProjectPage, ProjectQuery, ProjectRow, SortField, SortOrder};
