// Display host port - the view that owns the named surfaces
use crate::domain::chart::Rendering;
use crate::domain::error::DashboardError;

pub trait DisplayHost: Send + Sync {
    /// Make the given surfaces available. Already mounted keys keep their rendering.
    fn mount(&self, keys: &[&str]);

    /// Remove a surface; later renders into it fail with `RenderTargetMissing`.
    fn unmount(&self, key: &str);

    /// Replace the rendering on `key` entirely.
    fn render(&self, key: &str, rendering: Rendering) -> Result<(), DashboardError>;
}
