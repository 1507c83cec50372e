use storage::{
    CalculationStore,
    dto::{calculation::CalculationFilter, common::PaginatedResponse},
    error::Result,
    models::StoredCalculation,
};

/// One page of the caller's calculation history
pub async fn list_calculations(
    store: &dyn CalculationStore,
    user_id: &str,
    filter: &CalculationFilter,
) -> Result<PaginatedResponse<StoredCalculation>> {
    let pagination = filter.pagination();
    // Callers validate the filter first; an unparsable kind lists everything.
    let kind = filter.kind().ok().flatten();

    let (calculations, total_items) = store.list(user_id, kind, pagination).await?;

    Ok(PaginatedResponse::new(calculations, pagination, total_items))
}
