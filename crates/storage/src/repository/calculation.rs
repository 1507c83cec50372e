use chrono::NaiveDateTime;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::{
    CalculationRecord, CalculatorInput, CalculatorKind, MetricResult, StoredCalculation,
};

/// Newest first. `seq` follows insertion order, so equal timestamps
/// resolve to the later save.
const NEWEST_FIRST: &str = "computed_at DESC, seq DESC";

const LATEST_PER_KIND_SQL: &str = r#"
    SELECT DISTINCT ON (calculator_kind)
        calculation_id, user_id, calculator_kind, input, metrics, category, computed_at
    FROM calculations
    WHERE user_id = $1
    ORDER BY calculator_kind, computed_at DESC, seq DESC
"#;

#[derive(FromRow)]
struct CalculationRow {
    calculation_id: Uuid,
    user_id: String,
    calculator_kind: String,
    input: Json<CalculatorInput>,
    metrics: Json<MetricResult>,
    category: String,
    computed_at: NaiveDateTime,
}

impl TryFrom<CalculationRow> for StoredCalculation {
    type Error = StorageError;

    fn try_from(row: CalculationRow) -> Result<Self> {
        let kind = row
            .calculator_kind
            .parse::<CalculatorKind>()
            .map_err(|_| {
                StorageError::ConstraintViolation(format!(
                    "unknown calculator kind '{}'",
                    row.calculator_kind
                ))
            })?;

        Ok(Self {
            calculation_id: row.calculation_id,
            user_id: row.user_id,
            kind,
            input: row.input.0,
            metrics: row.metrics.0,
            category: row.category,
            computed_at: row.computed_at,
        })
    }
}

pub struct CalculationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CalculationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, user_id: &str, record: &CalculationRecord) -> Result<Uuid> {
        let calculation_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO calculations
                (calculation_id, user_id, calculator_kind, input, metrics, category, computed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(calculation_id)
        .bind(user_id)
        .bind(record.kind.as_str())
        .bind(Json(record.input))
        .bind(Json(record.metrics.clone()))
        .bind(record.category.label())
        .bind(record.computed_at)
        .execute(self.pool)
        .await?;

        Ok(calculation_id)
    }

    /// Most recent calculation of each kind for the user.
    pub async fn latest_per_kind(&self, user_id: &str) -> Result<Vec<StoredCalculation>> {
        let rows: Vec<CalculationRow> = sqlx::query_as(LATEST_PER_KIND_SQL)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(StoredCalculation::try_from).collect()
    }

    pub async fn list(
        &self,
        user_id: &str,
        kind: Option<CalculatorKind>,
        pagination: PaginationParams,
    ) -> Result<(Vec<StoredCalculation>, i64)> {
        let total_items = self.count(user_id, kind).await?;

        let mut query = QueryBuilder::new(
            r#"
            SELECT calculation_id, user_id, calculator_kind, input, metrics, category, computed_at
            FROM calculations
            WHERE user_id =
            "#,
        );
        query.push_bind(user_id);

        if let Some(kind) = kind {
            query.push(" AND calculator_kind = ");
            query.push_bind(kind.as_str());
        }

        query.push(" ORDER BY ");
        query.push(NEWEST_FIRST);
        query.push(" LIMIT ");
        query.push_bind(i64::from(pagination.limit()));
        query.push(" OFFSET ");
        query.push_bind(i64::from(pagination.offset()));

        let rows: Vec<CalculationRow> = query.build_query_as().fetch_all(self.pool).await?;
        let calculations = rows
            .into_iter()
            .map(StoredCalculation::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok((calculations, total_items))
    }

    pub async fn count(&self, user_id: &str, kind: Option<CalculatorKind>) -> Result<i64> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM calculations WHERE user_id = ");
        query.push_bind(user_id);

        if let Some(kind) = kind {
            query.push(" AND calculator_kind = ");
            query.push_bind(kind.as_str());
        }

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn delete_for_user(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM calculations WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
