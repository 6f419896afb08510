// In-memory display host holding the current rendering of every surface
use crate::application::display_host::DisplayHost;
use crate::domain::chart::Rendering;
use crate::domain::error::DashboardError;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::broadcast;

const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, Serialize)]
pub struct SurfaceView {
    pub key: String,
    /// Store-wide sequence number of the last render, 0 when never rendered.
    pub revision: u64,
    pub render_count: u64,
    pub rendered_at: Option<DateTime<Utc>>,
    pub rendering: Option<Rendering>,
}

impl SurfaceView {
    fn empty(key: &str) -> Self {
        Self {
            key: key.to_string(),
            revision: 0,
            render_count: 0,
            rendered_at: None,
            rendering: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderEvent {
    pub surface: String,
    pub revision: u64,
    pub rendered_at: DateTime<Utc>,
    pub rendering: Rendering,
}

struct Surfaces {
    views: BTreeMap<String, SurfaceView>,
    revision: u64,
}

pub struct SurfaceStore {
    surfaces: RwLock<Surfaces>,
    events: broadcast::Sender<RenderEvent>,
}

impl SurfaceStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            surfaces: RwLock::new(Surfaces {
                views: BTreeMap::new(),
                revision: 0,
            }),
            events,
        }
    }

    pub fn get(&self, key: &str) -> Option<SurfaceView> {
        self.surfaces.read().views.get(key).cloned()
    }

    /// All mounted surfaces, ordered by key.
    pub fn snapshot(&self) -> Vec<SurfaceView> {
        self.surfaces.read().views.values().cloned().collect()
    }

    /// Render events from now on. Slow receivers may observe `Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<RenderEvent> {
        self.events.subscribe()
    }
}

impl Default for SurfaceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayHost for SurfaceStore {
    fn mount(&self, keys: &[&str]) {
        let mut surfaces = self.surfaces.write();
        for key in keys {
            surfaces
                .views
                .entry((*key).to_string())
                .or_insert_with(|| SurfaceView::empty(key));
        }
        tracing::debug!("Mounted {} surfaces", keys.len());
    }

    fn unmount(&self, key: &str) {
        if self.surfaces.write().views.remove(key).is_some() {
            tracing::debug!(surface = key, "Unmounted surface");
        }
    }

    fn render(&self, key: &str, rendering: Rendering) -> Result<(), DashboardError> {
        let event = {
            let mut surfaces = self.surfaces.write();
            let revision = surfaces.revision + 1;
            let view = surfaces
                .views
                .get_mut(key)
                .ok_or_else(|| DashboardError::RenderTargetMissing(key.to_string()))?;

            let rendered_at = Utc::now();
            view.revision = revision;
            view.render_count += 1;
            view.rendered_at = Some(rendered_at);
            view.rendering = Some(rendering.clone());
            surfaces.revision = revision;

            RenderEvent {
                surface: key.to_string(),
                revision,
                rendered_at,
                rendering,
            }
        };

        // No subscribers is fine
        let _ = self.events.send(event);
        Ok(())
    }
}
