use storage::{CalculationStore, dto::report::ProfileReport, error::Result, services};

pub async fn get_report(store: &dyn CalculationStore, user_id: &str) -> Result<ProfileReport> {
    services::profile_report(store, user_id).await
}

/// Removes the caller's history and returns how many records went away.
pub async fn clear_calculations(store: &dyn CalculationStore, user_id: &str) -> Result<u64> {
    let deleted = store.clear(user_id).await?;
    tracing::info!(user_id, deleted, "Calculation history cleared");
    Ok(deleted)
}
