use async_trait::async_trait;
use uuid::Uuid;

use crate::Database;
use crate::dto::common::PaginationParams;
use crate::error::Result;
use crate::models::{CalculationRecord, CalculatorKind, StoredCalculation};
use crate::repository::CalculationRepository;

use super::CalculationStore;

#[async_trait]
impl CalculationStore for Database {
    async fn save(&self, user_id: &str, record: &CalculationRecord) -> Result<Uuid> {
        CalculationRepository::new(self.pool())
            .insert(user_id, record)
            .await
    }

    async fn latest_per_kind(&self, user_id: &str) -> Result<Vec<StoredCalculation>> {
        CalculationRepository::new(self.pool())
            .latest_per_kind(user_id)
            .await
    }

    async fn list(
        &self,
        user_id: &str,
        kind: Option<CalculatorKind>,
        pagination: PaginationParams,
    ) -> Result<(Vec<StoredCalculation>, i64)> {
        CalculationRepository::new(self.pool())
            .list(user_id, kind, pagination)
            .await
    }

    async fn count(&self, user_id: &str, kind: Option<CalculatorKind>) -> Result<i64> {
        CalculationRepository::new(self.pool())
            .count(user_id, kind)
            .await
    }

    async fn clear(&self, user_id: &str) -> Result<u64> {
        CalculationRepository::new(self.pool())
            .delete_for_user(user_id)
            .await
    }
}
