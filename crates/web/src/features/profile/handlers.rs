use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use storage::dto::report::ProfileReport;
use utoipa::ToSchema;

use crate::error::WebError;
use crate::middleware::auth::Identity;
use crate::state::SharedStore;

use super::services;

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearResponse {
    pub deleted: u64,
}

#[utoipa::path(
    get,
    path = "/api/profile/report",
    responses(
        (status = 200, description = "Latest result of every calculator used", body = ProfileReport),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("bearer_auth" = [])),
    tag = "profile"
)]
pub async fn get_report(
    State(store): State<SharedStore>,
    Extension(identity): Extension<Identity>,
) -> Result<Response, WebError> {
    let report = services::get_report(store.as_ref(), &identity.user_id).await?;

    Ok(Json(report).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/profile/calculations",
    responses(
        (status = 200, description = "History cleared", body = ClearResponse),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("bearer_auth" = [])),
    tag = "profile"
)]
pub async fn clear_calculations(
    State(store): State<SharedStore>,
    Extension(identity): Extension<Identity>,
) -> Result<Response, WebError> {
    let deleted = services::clear_calculations(store.as_ref(), &identity.user_id).await?;

    Ok(Json(ClearResponse { deleted }).into_response())
}
