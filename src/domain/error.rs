// Dashboard error taxonomy
use std::fmt;
use std::time::Duration;

/// The four independent fetch/render pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    KpiSnapshot,
    AppointmentDistribution,
    RevenueTrend,
    DepartmentDistribution,
}

impl FetchKind {
    pub const ALL: [FetchKind; 4] = [
        FetchKind::KpiSnapshot,
        FetchKind::AppointmentDistribution,
        FetchKind::RevenueTrend,
        FetchKind::DepartmentDistribution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FetchKind::KpiSnapshot => "kpi_snapshot",
            FetchKind::AppointmentDistribution => "appointment_distribution",
            FetchKind::RevenueTrend => "revenue_trend",
            FetchKind::DepartmentDistribution => "department_distribution",
        }
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DashboardError {
    #[error("fetch {kind} failed: {reason}")]
    Fetch { kind: FetchKind, reason: String },

    #[error("fetch {kind} timed out after {after:?}")]
    FetchTimeout { kind: FetchKind, after: Duration },

    #[error("fetch {kind} task aborted: {reason}")]
    TaskAborted { kind: FetchKind, reason: String },

    #[error("display surface `{0}` is not mounted")]
    RenderTargetMissing(String),

    #[error("action `{0}` is already registered")]
    DuplicateAction(String),
}
