use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    dto::calculation::{
        BmiRequest, BodyMetricsRequest, BodyShapeRequest, CalculationResponse,
        DiabetesRiskRequest, GlucoseRequest,
    },
    models::CalculatorInput,
};

use crate::error::WebError;
use crate::middleware::auth::Identity;
use crate::state::SharedStore;

use super::extract::CalculatorJson;
use super::services;

#[utoipa::path(
    post,
    path = "/api/calculators/bmi",
    request_body = BmiRequest,
    responses(
        (status = 200, description = "BMI calculated", body = CalculationResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 400, description = "Invalid input")
    ),
    security(("bearer_auth" = [])),
    tag = "calculators"
)]
pub async fn calculate_bmi(
    State(store): State<SharedStore>,
    Extension(identity): Extension<Identity>,
    CalculatorJson(request): CalculatorJson<BmiRequest>,
) -> Result<Response, WebError> {
    let input = CalculatorInput::try_from(&request)?;
    let response = services::run_calculation(store, &identity, input)?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/calculators/bmr",
    request_body = BodyMetricsRequest,
    responses(
        (status = 200, description = "BMR calculated", body = CalculationResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 400, description = "Invalid input")
    ),
    security(("bearer_auth" = [])),
    tag = "calculators"
)]
pub async fn calculate_bmr(
    State(store): State<SharedStore>,
    Extension(identity): Extension<Identity>,
    CalculatorJson(request): CalculatorJson<BodyMetricsRequest>,
) -> Result<Response, WebError> {
    let input = CalculatorInput::Bmr(request.to_input()?);
    let response = services::run_calculation(store, &identity, input)?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/calculators/body-fat",
    request_body = BodyMetricsRequest,
    responses(
        (status = 200, description = "Body fat estimated", body = CalculationResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 400, description = "Invalid input")
    ),
    security(("bearer_auth" = [])),
    tag = "calculators"
)]
pub async fn calculate_body_fat(
    State(store): State<SharedStore>,
    Extension(identity): Extension<Identity>,
    CalculatorJson(request): CalculatorJson<BodyMetricsRequest>,
) -> Result<Response, WebError> {
    let input = CalculatorInput::BodyFat(request.to_input()?);
    let response = services::run_calculation(store, &identity, input)?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/calculators/body-shape",
    request_body = BodyShapeRequest,
    responses(
        (status = 200, description = "Body shape classified", body = CalculationResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 400, description = "Invalid input")
    ),
    security(("bearer_auth" = [])),
    tag = "calculators"
)]
pub async fn calculate_body_shape(
    State(store): State<SharedStore>,
    Extension(identity): Extension<Identity>,
    CalculatorJson(request): CalculatorJson<BodyShapeRequest>,
) -> Result<Response, WebError> {
    let input = CalculatorInput::try_from(&request)?;
    let response = services::run_calculation(store, &identity, input)?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/calculators/diabetes-risk",
    request_body = DiabetesRiskRequest,
    responses(
        (status = 200, description = "Diabetes risk scored", body = CalculationResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 400, description = "Invalid input")
    ),
    security(("bearer_auth" = [])),
    tag = "calculators"
)]
pub async fn calculate_diabetes_risk(
    State(store): State<SharedStore>,
    Extension(identity): Extension<Identity>,
    CalculatorJson(request): CalculatorJson<DiabetesRiskRequest>,
) -> Result<Response, WebError> {
    let input = CalculatorInput::try_from(&request)?;
    let response = services::run_calculation(store, &identity, input)?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/calculators/glucose",
    request_body = GlucoseRequest,
    responses(
        (status = 200, description = "Glucose level screened", body = CalculationResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 400, description = "Invalid input")
    ),
    security(("bearer_auth" = [])),
    tag = "calculators"
)]
pub async fn screen_glucose(
    State(store): State<SharedStore>,
    Extension(identity): Extension<Identity>,
    CalculatorJson(request): CalculatorJson<GlucoseRequest>,
) -> Result<Response, WebError> {
    let input = CalculatorInput::try_from(&request)?;
    let response = services::run_calculation(store, &identity, input)?;

    Ok(Json(response).into_response())
}
