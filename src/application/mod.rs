// Application layer - Ports, projections and the dashboard controller
pub mod dashboard_controller;
pub mod data_source;
pub mod display_host;
pub mod projection;
pub mod registry;

#[cfg(test)]
pub mod test_support;
