use axum::{Router, routing::post};

use super::handlers::{
    calculate_bmi, calculate_bmr, calculate_body_fat, calculate_body_shape,
    calculate_diabetes_risk, screen_glucose,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bmi", post(calculate_bmi))
        .route("/bmr", post(calculate_bmr))
        .route("/body-fat", post(calculate_body_fat))
        .route("/body-shape", post(calculate_body_shape))
        .route("/diabetes-risk", post(calculate_diabetes_risk))
        .route("/glucose", post(screen_glucose))
}
