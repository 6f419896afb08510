// Domain layer - Metric data, formatting and render descriptions
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod metrics;
