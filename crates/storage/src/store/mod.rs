//! Persistence seam for calculation records.

mod memory;
mod postgres;

pub use memory::InMemoryCalculationStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::error::Result;
use crate::models::{CalculationRecord, CalculatorKind, StoredCalculation};

/// Keeps calculation records per user.
///
/// Records are append-only; the newest record of a kind supersedes older
/// ones when reading the profile, but history keeps all of them.
#[async_trait]
pub trait CalculationStore: Send + Sync {
    /// Appends a record and returns its id.
    async fn save(&self, user_id: &str, record: &CalculationRecord) -> Result<Uuid>;

    /// At most one record per kind: the one with the latest `computed_at`.
    async fn latest_per_kind(&self, user_id: &str) -> Result<Vec<StoredCalculation>>;

    /// One page of history, newest first, with the total matching count.
    async fn list(
        &self,
        user_id: &str,
        kind: Option<CalculatorKind>,
        pagination: PaginationParams,
    ) -> Result<(Vec<StoredCalculation>, i64)>;

    /// Number of records of the user, optionally of one kind.
    async fn count(&self, user_id: &str, kind: Option<CalculatorKind>) -> Result<i64>;

    /// Removes every record of the user and returns how many were removed.
    async fn clear(&self, user_id: &str) -> Result<u64>;
}
