use axum::{
    Extension, Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    dto::{calculation::CalculationFilter, common::PaginatedResponse},
    models::StoredCalculation,
};

use crate::error::WebError;
use crate::middleware::auth::Identity;
use crate::state::SharedStore;

use super::services;

#[utoipa::path(
    get,
    path = "/api/calculations",
    params(CalculationFilter),
    responses(
        (status = 200, description = "Calculation history, newest first", body = PaginatedResponse<StoredCalculation>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Missing or invalid API key")
    ),
    security(("bearer_auth" = [])),
    tag = "calculations"
)]
pub async fn list_calculations(
    State(store): State<SharedStore>,
    Extension(identity): Extension<Identity>,
    Query(filter): Query<CalculationFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let response =
        services::list_calculations(store.as_ref(), &identity.user_id, &filter).await?;

    Ok(Json(response).into_response())
}
