use std::sync::Arc;

use axum::extract::FromRef;
use storage::CalculationStore;

use crate::middleware::auth::IdentityProvider;

pub type SharedStore = Arc<dyn CalculationStore>;
pub type SharedIdentityProvider = Arc<dyn IdentityProvider>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub identity: SharedIdentityProvider,
}

impl AppState {
    pub fn new(store: SharedStore, identity: SharedIdentityProvider) -> Self {
        Self { store, identity }
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for SharedIdentityProvider {
    fn from_ref(state: &AppState) -> Self {
        state.identity.clone()
    }
}
