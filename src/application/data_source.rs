// Data source port for precomputed dashboard metrics
use crate::domain::metrics::{MetricSnapshot, SeriesPoint};
use async_trait::async_trait;

#[async_trait]
pub trait DashboardDataSource: Send + Sync {
    /// KPI panel values (patients, doctors, revenue, occupancy, ...)
    async fn get_kpi_snapshot(&self) -> anyhow::Result<MetricSnapshot>;

    /// Appointment counts keyed by state: draft, confirmed, done, cancel
    async fn get_appointment_distribution(&self) -> anyhow::Result<MetricSnapshot>;

    /// Monthly revenue, category = month label
    async fn get_revenue_trend(&self) -> anyhow::Result<Vec<SeriesPoint>>;

    /// Appointment counts per department, category = department name
    async fn get_department_distribution(&self) -> anyhow::Result<Vec<SeriesPoint>>;
}
