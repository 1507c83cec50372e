use axum::{Router, middleware};

use crate::features::{calculations, calculators, profile};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Every API route requires a bearer key.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/calculators", calculators::routes::routes())
        .nest("/calculations", calculations::routes::routes())
        .nest("/profile", profile::routes::routes())
        .route_layer(middleware::from_fn_with_state(
            state.identity.clone(),
            require_auth,
        ));

    Router::new().nest("/api", api).with_state(state)
}
