use crate::config::Config;
use crate::store::BoundaryStore;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BoundaryStore>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<BoundaryStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
