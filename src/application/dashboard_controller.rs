// Dashboard controller - independent fetch/render pairs run concurrently
use crate::application::data_source::DashboardDataSource;
use crate::application::display_host::DisplayHost;
use crate::application::projection;
use crate::domain::chart::Rendering;
use crate::domain::dashboard::ALL_SURFACES;
use crate::domain::error::{DashboardError, FetchKind};
use parking_lot::Mutex;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    Idle,
    Loading,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerSettings {
    /// Per-fetch deadline. `None` waits forever, so a hung backend call keeps
    /// the controller `Loading` and its result may land after a newer refresh.
    pub fetch_timeout: Option<Duration>,
}

/// Everything a controller needs; handed to registry factories.
#[derive(Clone)]
pub struct ControllerDeps {
    pub source: Arc<dyn DashboardDataSource>,
    pub host: Arc<dyn DisplayHost>,
    pub settings: ControllerSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    /// Fetch succeeded; `missing` counts surfaces that were not mounted.
    Rendered { rendered: usize, missing: usize },
    Failed(DashboardError),
}

#[derive(Debug, Clone)]
pub struct RefreshReport {
    pub refresh_id: u64,
    pub outcomes: Vec<(FetchKind, PairOutcome)>,
    pub elapsed: Duration,
}

impl RefreshReport {
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, PairOutcome::Failed(_)))
            .count()
    }
}

#[cfg(test)]
impl RefreshReport {
    pub fn outcome(&self, kind: FetchKind) -> Option<&PairOutcome> {
        self.outcomes.iter().find(|(k, _)| *k == kind).map(|(_, o)| o)
    }
}

/// Awaitable handle for one refresh; dropping it does not cancel anything.
#[derive(Debug)]
pub struct RefreshHandle {
    refresh_id: u64,
    handle: JoinHandle<RefreshReport>,
}

impl RefreshHandle {
    pub fn id(&self) -> u64 {
        self.refresh_id
    }

    /// Resolves once all four fetches of this refresh have settled.
    pub async fn settled(self) -> Result<RefreshReport, JoinError> {
        self.handle.await
    }
}

/// Counts outstanding refreshes and publishes Idle/Loading transitions.
struct LoadTracker {
    outstanding: Mutex<usize>,
    state: watch::Sender<ControllerState>,
}

impl LoadTracker {
    fn new() -> Self {
        let (state, _) = watch::channel(ControllerState::Idle);
        Self {
            outstanding: Mutex::new(0),
            state,
        }
    }

    fn begin(&self) {
        let mut outstanding = self.outstanding.lock();
        *outstanding += 1;
        self.state.send_replace(ControllerState::Loading);
    }

    fn finish(&self) {
        let mut outstanding = self.outstanding.lock();
        *outstanding = outstanding.saturating_sub(1);
        if *outstanding == 0 {
            self.state.send_replace(ControllerState::Idle);
        }
    }
}

#[derive(Clone)]
pub struct DashboardController {
    source: Arc<dyn DashboardDataSource>,
    host: Arc<dyn DisplayHost>,
    settings: ControllerSettings,
    activated: Arc<AtomicBool>,
    next_refresh_id: Arc<AtomicU64>,
    load: Arc<LoadTracker>,
    last_report: Arc<Mutex<Option<RefreshReport>>>,
}

impl DashboardController {
    pub fn new(
        source: Arc<dyn DashboardDataSource>,
        host: Arc<dyn DisplayHost>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            source,
            host,
            settings,
            activated: Arc::new(AtomicBool::new(false)),
            next_refresh_id: Arc::new(AtomicU64::new(0)),
            load: Arc::new(LoadTracker::new()),
            last_report: Arc::new(Mutex::new(None)),
        }
    }

    pub fn from_deps(deps: ControllerDeps) -> Self {
        Self::new(deps.source, deps.host, deps.settings)
    }

    pub fn state(&self) -> ControllerState {
        *self.load.state.borrow()
    }

    /// Report of the most recently settled refresh, if any has settled.
    pub fn last_report(&self) -> Option<RefreshReport> {
        self.last_report.lock().clone()
    }

    /// Mounts the surfaces on first call, then refreshes. Must run inside a
    /// tokio runtime.
    pub fn activate(&self) -> RefreshHandle {
        if !self.activated.swap(true, Ordering::SeqCst) {
            self.host.mount(&ALL_SURFACES);
            tracing::info!(surfaces = ALL_SURFACES.len(), "Dashboard activated");
        }
        self.refresh()
    }

    /// Unmounts every surface. Fetches still in flight settle normally but
    /// their renders become no-ops; a later `activate` mounts again.
    pub fn deactivate(&self) {
        if self.activated.swap(false, Ordering::SeqCst) {
            for key in ALL_SURFACES {
                self.host.unmount(key);
            }
            tracing::info!("Dashboard deactivated");
        }
    }

    /// Fires the four fetches without waiting for them. Earlier refreshes
    /// still in flight are not cancelled; whichever render lands last wins.
    pub fn refresh(&self) -> RefreshHandle {
        let refresh_id = self.next_refresh_id.fetch_add(1, Ordering::Relaxed) + 1;
        let started = Instant::now();
        self.load.begin();
        tracing::info!(refresh_id, "Refreshing dashboard");

        // 1. Spawn one task per fetch/render pair
        let pairs: Vec<(FetchKind, JoinHandle<PairOutcome>)> = FetchKind::ALL
            .iter()
            .map(|&kind| {
                let controller = self.clone();
                let task = tokio::spawn(async move { controller.run_pair(kind).await });
                (kind, task)
            })
            .collect();

        // 2. Spawn the settlement task
        let load = self.load.clone();
        let last_report = self.last_report.clone();
        let handle = tokio::spawn(async move {
            let (kinds, tasks): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
            let results = futures::future::join_all(tasks).await;

            let outcomes: Vec<(FetchKind, PairOutcome)> = kinds
                .into_iter()
                .zip(results)
                .map(|(kind, result)| {
                    let outcome = result.unwrap_or_else(|e| {
                        tracing::error!(fetch = %kind, error = %e, "Fetch task aborted");
                        PairOutcome::Failed(DashboardError::TaskAborted {
                            kind,
                            reason: e.to_string(),
                        })
                    });
                    (kind, outcome)
                })
                .collect();

            let report = RefreshReport {
                refresh_id,
                outcomes,
                elapsed: started.elapsed(),
            };
            tracing::info!(
                refresh_id,
                failures = report.failures(),
                elapsed_ms = report.elapsed.as_millis() as u64,
                "Dashboard refresh settled"
            );

            // Published before going Idle, so an Idle reader sees this report
            *last_report.lock() = Some(report.clone());
            load.finish();
            report
        });

        RefreshHandle { refresh_id, handle }
    }

    /// Replaces the rendering on `key`. Returns false, without error, when the
    /// surface is not mounted (e.g. the view was torn down mid-fetch).
    pub fn render(&self, key: &str, rendering: Rendering) -> bool {
        match self.host.render(key, rendering) {
            Ok(()) => true,
            Err(DashboardError::RenderTargetMissing(_)) => {
                tracing::debug!(surface = key, "Surface not mounted, render skipped");
                false
            }
            Err(e) => {
                tracing::warn!(surface = key, error = %e, "Render failed");
                false
            }
        }
    }

    async fn run_pair(&self, kind: FetchKind) -> PairOutcome {
        let renderings = match self.fetch_renderings(kind).await {
            Ok(renderings) => renderings,
            Err(e) => {
                // Surfaces keep whatever they showed before
                tracing::warn!(fetch = %kind, error = %e, "Dashboard fetch failed");
                return PairOutcome::Failed(e);
            }
        };

        let mut rendered = 0;
        let mut missing = 0;
        for (key, rendering) in renderings {
            if self.render(key, rendering) {
                rendered += 1;
            } else {
                missing += 1;
            }
        }

        tracing::debug!(fetch = %kind, rendered, missing, "Fetch rendered");
        PairOutcome::Rendered { rendered, missing }
    }

    async fn fetch_renderings(
        &self,
        kind: FetchKind,
    ) -> Result<Vec<(&'static str, Rendering)>, DashboardError> {
        match kind {
            FetchKind::KpiSnapshot => {
                let snapshot = self.fetch(kind, self.source.get_kpi_snapshot()).await?;
                Ok(projection::kpi_renderings(&snapshot))
            }
            FetchKind::AppointmentDistribution => {
                let snapshot = self
                    .fetch(kind, self.source.get_appointment_distribution())
                    .await?;
                Ok(vec![projection::appointment_pie(&snapshot)])
            }
            FetchKind::RevenueTrend => {
                let points = self.fetch(kind, self.source.get_revenue_trend()).await?;
                Ok(vec![projection::revenue_line(&points)])
            }
            FetchKind::DepartmentDistribution => {
                let points = self
                    .fetch(kind, self.source.get_department_distribution())
                    .await?;
                Ok(vec![projection::department_bar(&points)])
            }
        }
    }

    async fn fetch<T, F>(&self, kind: FetchKind, request: F) -> Result<T, DashboardError>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        let result = match self.settings.fetch_timeout {
            Some(after) => tokio::time::timeout(after, request)
                .await
                .map_err(|_| DashboardError::FetchTimeout { kind, after })?,
            None => request.await,
        };

        result.map_err(|e| DashboardError::Fetch {
            kind,
            reason: format!("{:#}", e),
        })
    }
}
