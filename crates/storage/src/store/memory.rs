use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::{CalculationRecord, CalculatorKind, StoredCalculation};

use super::CalculationStore;

/// Process-local store used when no database is configured, and in tests.
#[derive(Debug, Default)]
pub struct InMemoryCalculationStore {
    records: RwLock<HashMap<String, Vec<StoredCalculation>>>,
    reject_writes: bool,
}

impl InMemoryCalculationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every `save` fails. Reads still succeed.
    pub fn failing() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl CalculationStore for InMemoryCalculationStore {
    async fn save(&self, user_id: &str, record: &CalculationRecord) -> Result<Uuid> {
        if self.reject_writes {
            return Err(StorageError::Unavailable(
                "in-memory store rejects writes".to_string(),
            ));
        }

        let calculation_id = Uuid::new_v4();
        let stored = StoredCalculation::from_record(calculation_id, user_id, record);

        self.records
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(stored);

        Ok(calculation_id)
    }

    async fn latest_per_kind(&self, user_id: &str) -> Result<Vec<StoredCalculation>> {
        let records = self.records.read().await;
        let Some(history) = records.get(user_id) else {
            return Ok(Vec::new());
        };

        // Later pushes win ties on computed_at.
        let mut latest: HashMap<CalculatorKind, &StoredCalculation> = HashMap::new();
        for calculation in history {
            match latest.get(&calculation.kind) {
                Some(current) if current.computed_at > calculation.computed_at => {}
                _ => {
                    latest.insert(calculation.kind, calculation);
                }
            }
        }

        Ok(latest.into_values().cloned().collect())
    }

    async fn list(
        &self,
        user_id: &str,
        kind: Option<CalculatorKind>,
        pagination: PaginationParams,
    ) -> Result<(Vec<StoredCalculation>, i64)> {
        let records = self.records.read().await;
        let mut matching: Vec<&StoredCalculation> = records
            .get(user_id)
            .map(|history| {
                history
                    .iter()
                    .filter(|c| kind.is_none_or(|k| c.kind == k))
                    .collect()
            })
            .unwrap_or_default();

        // Stable sort keeps insertion order between equal timestamps; reverse
        // afterwards so the newest insert comes first.
        matching.sort_by_key(|c| c.computed_at);
        matching.reverse();

        let total_items = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .cloned()
            .collect();

        Ok((page, total_items))
    }

    async fn count(&self, user_id: &str, kind: Option<CalculatorKind>) -> Result<i64> {
        let records = self.records.read().await;
        let count = records.get(user_id).map_or(0, |history| {
            history
                .iter()
                .filter(|c| kind.is_none_or(|k| c.kind == k))
                .count()
        });
        Ok(count as i64)
    }

    async fn clear(&self, user_id: &str) -> Result<u64> {
        let removed = self.records.write().await.remove(user_id);
        Ok(removed.map_or(0, |history| history.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use super::*;
    use crate::models::{BmiCategory, BmiInput, CalculatorInput, Category, MetricResult};

    fn at(minute: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            + Duration::minutes(minute)
    }

    fn bmi_record(category: BmiCategory, minute: i64) -> CalculationRecord {
        CalculationRecord {
            kind: CalculatorKind::Bmi,
            input: CalculatorInput::Bmi(BmiInput {
                weight_kg: 70.0,
                height_cm: 175.0,
            }),
            metrics: MetricResult::default(),
            category: Category::Bmi(category),
            computed_at: at(minute),
        }
    }

    #[tokio::test]
    async fn test_latest_per_kind_keeps_newest() {
        let store = InMemoryCalculationStore::new();
        store.save("alice", &bmi_record(BmiCategory::Normal, 0)).await.unwrap();
        store.save("alice", &bmi_record(BmiCategory::Overweight, 5)).await.unwrap();

        let latest = store.latest_per_kind("alice").await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].category, "Overweight");
    }

    #[tokio::test]
    async fn test_equal_timestamps_resolve_to_later_save() {
        let store = InMemoryCalculationStore::new();
        store.save("alice", &bmi_record(BmiCategory::Normal, 0)).await.unwrap();
        store.save("alice", &bmi_record(BmiCategory::Obese, 0)).await.unwrap();

        let latest = store.latest_per_kind("alice").await.unwrap();
        assert_eq!(latest[0].category, "Obese");

        let (page, _) = store
            .list("alice", None, PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(page[0].category, "Obese");
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = InMemoryCalculationStore::new();
        store.save("alice", &bmi_record(BmiCategory::Normal, 0)).await.unwrap();

        assert!(store.latest_per_kind("bob").await.unwrap().is_empty());
        assert_eq!(store.clear("bob").await.unwrap(), 0);
        assert_eq!(store.latest_per_kind("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_paginates_newest_first() {
        let store = InMemoryCalculationStore::new();
        for minute in 0..5 {
            store.save("alice", &bmi_record(BmiCategory::Normal, minute)).await.unwrap();
        }

        let pagination = PaginationParams {
            page: 2,
            page_size: 2,
        };
        let (page, total) = store.list("alice", None, pagination).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].computed_at, at(2));
        assert_eq!(page[1].computed_at, at(1));

        let (none, total) = store
            .list("alice", Some(CalculatorKind::BodyShape), PaginationParams::default())
            .await
            .unwrap();
        assert!(none.is_empty());
        assert_eq!(total, 0);
        assert_eq!(store.count("alice", Some(CalculatorKind::Bmi)).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_clear_removes_history() {
        let store = InMemoryCalculationStore::new();
        store.save("alice", &bmi_record(BmiCategory::Normal, 0)).await.unwrap();
        store.save("alice", &bmi_record(BmiCategory::Normal, 1)).await.unwrap();

        assert_eq!(store.clear("alice").await.unwrap(), 2);
        assert!(store.latest_per_kind("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failing_store_rejects_saves() {
        let store = InMemoryCalculationStore::failing();
        let err = store
            .save("alice", &bmi_record(BmiCategory::Normal, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
    }
}
