use axum::{
    Router,
    routing::{delete, get},
};

use super::handlers::{clear_calculations, get_report};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/report", get(get_report))
        .route("/calculations", delete(clear_calculations))
}
