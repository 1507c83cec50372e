use storage::{
    ValidationError,
    dto::calculation::CalculationResponse,
    models::CalculatorInput,
    services::{calculate, persist_in_background},
};

use crate::middleware::auth::Identity;
use crate::state::SharedStore;

/// Computes the result and hands the record to the store without waiting.
pub fn run_calculation(
    store: SharedStore,
    identity: &Identity,
    input: CalculatorInput,
) -> Result<CalculationResponse, ValidationError> {
    let calculation = calculate(input)?;

    persist_in_background(store, identity.user_id.clone(), calculation.record.clone());

    tracing::info!(
        kind = %calculation.record.kind,
        category = calculation.record.category.label(),
        "Calculation completed"
    );

    Ok(CalculationResponse::from(calculation))
}
