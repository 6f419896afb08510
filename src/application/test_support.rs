// Scripted data source for controller tests
use crate::application::data_source::DashboardDataSource;
use crate::domain::error::FetchKind;
use crate::domain::metrics::{MetricSnapshot, SeriesPoint};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::time::Duration;

/// Replies in order; the last reply repeats once the script runs out.
struct Script<T> {
    replies: Vec<(T, Duration)>,
    next: Mutex<usize>,
}

impl<T: Clone> Script<T> {
    fn new(replies: Vec<(T, Duration)>) -> Self {
        Self {
            replies,
            next: Mutex::new(0),
        }
    }

    fn once(value: T) -> Self {
        Self::new(vec![(value, Duration::ZERO)])
    }

    fn take(&self) -> (T, Duration) {
        let mut next = self.next.lock();
        let idx = (*next).min(self.replies.len() - 1);
        *next += 1;
        self.replies[idx].clone()
    }
}

pub struct FakeSource {
    kpi: Script<MetricSnapshot>,
    appointments: Script<MetricSnapshot>,
    revenue: Script<Vec<SeriesPoint>>,
    departments: Script<Vec<SeriesPoint>>,
    failing: HashSet<FetchKind>,
    calls: Mutex<Vec<FetchKind>>,
}

impl FakeSource {
    pub fn healthy() -> Self {
        Self {
            kpi: Script::once(sample_kpis()),
            appointments: Script::once(sample_appointments()),
            revenue: Script::once(vec![
                SeriesPoint::new("May 2026", 1200.0),
                SeriesPoint::new("June 2026", 1500.0),
            ]),
            departments: Script::once(vec![
                SeriesPoint::new("Cardiology", 7.0),
                SeriesPoint::new("Pediatrics", 4.0),
            ]),
            failing: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self, kind: FetchKind) -> Self {
        self.failing.insert(kind);
        self
    }

    pub fn kpi_script(mut self, replies: Vec<(MetricSnapshot, Duration)>) -> Self {
        self.kpi = Script::new(replies);
        self
    }

    pub fn appointment_script(mut self, replies: Vec<(MetricSnapshot, Duration)>) -> Self {
        self.appointments = Script::new(replies);
        self
    }

    pub fn revenue_script(mut self, replies: Vec<(Vec<SeriesPoint>, Duration)>) -> Self {
        self.revenue = Script::new(replies);
        self
    }

    pub fn calls(&self, kind: FetchKind) -> usize {
        self.calls.lock().iter().filter(|k| **k == kind).count()
    }

    async fn reply<T: Clone>(&self, kind: FetchKind, script: &Script<T>) -> anyhow::Result<T> {
        self.calls.lock().push(kind);
        let (value, delay) = script.take();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&kind) {
            anyhow::bail!("simulated {} rejection", kind);
        }
        Ok(value)
    }
}

#[async_trait]
impl DashboardDataSource for FakeSource {
    async fn get_kpi_snapshot(&self) -> anyhow::Result<MetricSnapshot> {
        self.reply(FetchKind::KpiSnapshot, &self.kpi).await
    }

    async fn get_appointment_distribution(&self) -> anyhow::Result<MetricSnapshot> {
        self.reply(FetchKind::AppointmentDistribution, &self.appointments).await
    }

    async fn get_revenue_trend(&self) -> anyhow::Result<Vec<SeriesPoint>> {
        self.reply(FetchKind::RevenueTrend, &self.revenue).await
    }

    async fn get_department_distribution(&self) -> anyhow::Result<Vec<SeriesPoint>> {
        self.reply(FetchKind::DepartmentDistribution, &self.departments).await
    }
}

pub fn sample_kpis() -> MetricSnapshot {
    MetricSnapshot::new()
        .with("total_patients", 120.0)
        .with("total_doctors", 14.0)
        .with("total_appointments_today", 9.0)
        .with("total_revenue_month", 1234.5)
        .with("bed_occupancy_rate", 87.25)
        .with("total_admissions_active", 31.0)
}

pub fn sample_appointments() -> MetricSnapshot {
    MetricSnapshot::new()
        .with("draft", 2.0)
        .with("confirmed", 5.0)
        .with("done", 11.0)
        .with("cancel", 1.0)
}
