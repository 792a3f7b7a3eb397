//! Report Module
//!
//! Dashboard aggregation:
//! - Counters per role
//! - Chart series and activity feed
//! - Admin dashboard report
//! - Contractor roster and report tables

pub mod charts;
pub mod dashboard;
pub mod stats;
pub mod summary;

pub use charts::{
    recent_activity, relative_time, Activity, ActivityKind, CategoryCount, ChartData,
    ContractorPerformance, StatusCount,
};
pub use dashboard::DashboardReport;
pub use stats::{DashboardStats, RoleStats};
pub use summary::{contractor_roster, ContractorOverview, ReportSummary, REPORT_LIMIT};
