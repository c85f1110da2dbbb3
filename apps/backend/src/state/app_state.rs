use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::repos::posts::PostStore;
use crate::repos::profiles::ProfileStore;
use crate::repos::users::UserStore;
use crate::services::github::GithubClient;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub posts: Arc<dyn PostStore>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    pub github: GithubClient,
    /// Which store backs the handles above, reported by `/health`
    pub store_name: &'static str,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store_name)
            .field("security", &self.security)
            .field("github", &self.github)
            .finish_non_exhaustive()
    }
}
