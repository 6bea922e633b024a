//! Application state shared across handlers

use std::sync::Arc;

use application::RoutePlanningService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Address search and driving routes
    pub route_planning: Arc<RoutePlanningService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("route_planning", &self.route_planning)
            .field("config", &self.config)
            .finish()
    }
}
