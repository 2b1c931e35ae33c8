//! Custody (petty-cash) operations. Every read that reports a balance folds
//! it from additions and expenses on the spot; no stored balance exists to
//! drift.

use crate::models::{
    CreateCustody, CreateCustodyAddition, Custody, CustodyAddition, CustodySummary, UpdateCustody,
};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::Database;
use service_core::error::AppError;
use tracing::{info, instrument};

const CUSTODY_SUMMARY_SELECT: &str = r#"
    SELECT c.id, c.name, c.holder, c.budget, c.created_utc,
           COALESCE((SELECT SUM(amount) FROM custody_additions WHERE custody_id = c.id), 0::numeric) AS total_additions,
           COALESCE((SELECT SUM(amount) FROM expenses WHERE custody_id = c.id), 0::numeric) AS total_expenses,
           c.budget
           + COALESCE((SELECT SUM(amount) FROM custody_additions WHERE custody_id = c.id), 0::numeric)
           - COALESCE((SELECT SUM(amount) FROM expenses WHERE custody_id = c.id), 0::numeric) AS remaining
    FROM custodies c
"#;

impl Database {
    #[instrument(skip(self, input))]
    pub async fn create_custody(&self, input: &CreateCustody) -> Result<Custody, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_custody"])
            .start_timer();

        let custody = sqlx::query_as::<_, Custody>(
            r#"
            INSERT INTO custodies (name, holder, budget)
            VALUES ($1, $2, $3)
            RETURNING id, name, holder, budget, created_utc
            "#,
        )
        .bind(&input.name)
        .bind(&input.holder)
        .bind(input.budget)
        .fetch_one(self.pool())
        .await?;

        timer.observe_duration();
        info!(custody_id = custody.id, "Custody created");

        Ok(custody)
    }

    #[instrument(skip(self))]
    pub async fn list_custodies(&self) -> Result<Vec<CustodySummary>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_custodies"])
            .start_timer();

        let sql = format!("{CUSTODY_SUMMARY_SELECT} ORDER BY c.name, c.id");
        let custodies = sqlx::query_as::<_, CustodySummary>(&sql)
            .fetch_all(self.pool())
            .await?;

        timer.observe_duration();

        Ok(custodies)
    }

    #[instrument(skip(self))]
    pub async fn get_custody(&self, id: i64) -> Result<Option<CustodySummary>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_custody"])
            .start_timer();

        let sql = format!("{CUSTODY_SUMMARY_SELECT} WHERE c.id = $1");
        let custody = sqlx::query_as::<_, CustodySummary>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        timer.observe_duration();

        Ok(custody)
    }

    #[instrument(skip(self, input))]
    pub async fn update_custody(
        &self,
        id: i64,
        input: &UpdateCustody,
    ) -> Result<Option<Custody>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_custody"])
            .start_timer();

        let custody = sqlx::query_as::<_, Custody>(
            r#"
            UPDATE custodies
            SET name = COALESCE($2, name),
                holder = COALESCE($3, holder),
                budget = COALESCE($4, budget)
            WHERE id = $1
            RETURNING id, name, holder, budget, created_utc
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.holder)
        .bind(input.budget)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();
        if custody.is_some() {
            info!(custody_id = id, "Custody updated");
        }

        Ok(custody)
    }

    #[instrument(skip(self))]
    pub async fn delete_custody(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_custody"])
            .start_timer();

        let result = sqlx::query("DELETE FROM custodies WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        timer.observe_duration();
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(custody_id = id, "Custody deleted");
        }

        Ok(deleted)
    }

    #[instrument(skip(self, input), fields(custody_id))]
    pub async fn create_custody_addition(
        &self,
        custody_id: i64,
        input: &CreateCustodyAddition,
    ) -> Result<CustodyAddition, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_custody_addition"])
            .start_timer();

        let addition = sqlx::query_as::<_, CustodyAddition>(
            r#"
            INSERT INTO custody_additions (custody_id, amount, added_on, note)
            VALUES ($1, $2, $3, $4)
            RETURNING id, custody_id, amount, added_on, note, created_utc
            "#,
        )
        .bind(custody_id)
        .bind(input.amount)
        .bind(input.added_on)
        .bind(&input.note)
        .fetch_one(self.pool())
        .await?;

        timer.observe_duration();
        info!(
            addition_id = addition.id,
            custody_id,
            amount = %addition.amount,
            "Custody addition recorded"
        );

        Ok(addition)
    }

    #[instrument(skip(self))]
    pub async fn list_custody_additions(
        &self,
        custody_id: i64,
    ) -> Result<Vec<CustodyAddition>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_custody_additions"])
            .start_timer();

        let additions = sqlx::query_as::<_, CustodyAddition>(
            r#"
            SELECT id, custody_id, amount, added_on, note, created_utc
            FROM custody_additions
            WHERE custody_id = $1
            ORDER BY added_on DESC, id DESC
            "#,
        )
        .bind(custody_id)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(additions)
    }
}
