//! Expense operations.

use crate::models::{CreateExpense, Expense, ListExpensesFilter, UpdateExpense};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::Database;
use service_core::error::AppError;
use tracing::{info, instrument};

impl Database {
    #[instrument(skip(self, input))]
    pub async fn create_expense(&self, input: &CreateExpense) -> Result<Expense, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_expense"])
            .start_timer();

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (description, category, amount, spent_on, responsible, custody_id, project_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, description, category, amount, spent_on, responsible,
                      custody_id, project_id, created_utc
            "#,
        )
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.amount)
        .bind(input.spent_on)
        .bind(&input.responsible)
        .bind(input.custody_id)
        .bind(input.project_id)
        .fetch_one(self.pool())
        .await?;

        timer.observe_duration();
        info!(
            expense_id = expense.id,
            amount = %expense.amount,
            category = %expense.category,
            "Expense recorded"
        );

        Ok(expense)
    }

    #[instrument(skip(self, filter))]
    pub async fn list_expenses(
        &self,
        filter: &ListExpensesFilter,
    ) -> Result<Vec<Expense>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_expenses"])
            .start_timer();

        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, description, category, amount, spent_on, responsible,
                   custody_id, project_id, created_utc
            FROM expenses
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR responsible = $2)
              AND ($3::bigint IS NULL OR custody_id = $3)
              AND ($4::bigint IS NULL OR project_id = $4)
              AND ($5::date IS NULL OR spent_on >= $5)
              AND ($6::date IS NULL OR spent_on <= $6)
              AND ($7::text IS NULL OR description ILIKE '%' || $7 || '%')
            ORDER BY spent_on DESC, id DESC
            "#,
        )
        .bind(&filter.category)
        .bind(&filter.responsible)
        .bind(filter.custody_id)
        .bind(filter.project_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(&filter.search)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(expenses)
    }

    #[instrument(skip(self))]
    pub async fn get_expense(&self, id: i64) -> Result<Option<Expense>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_expense"])
            .start_timer();

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, description, category, amount, spent_on, responsible,
                   custody_id, project_id, created_utc
            FROM expenses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();

        Ok(expense)
    }

    #[instrument(skip(self, input))]
    pub async fn update_expense(
        &self,
        id: i64,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_expense"])
            .start_timer();

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET description = COALESCE($2, description),
                category = COALESCE($3, category),
                amount = COALESCE($4, amount),
                spent_on = COALESCE($5, spent_on),
                responsible = COALESCE($6, responsible)
            WHERE id = $1
            RETURNING id, description, category, amount, spent_on, responsible,
                      custody_id, project_id, created_utc
            "#,
        )
        .bind(id)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.amount)
        .bind(input.spent_on)
        .bind(&input.responsible)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();
        if expense.is_some() {
            info!(expense_id = id, "Expense updated");
        }

        Ok(expense)
    }

    #[instrument(skip(self))]
    pub async fn delete_expense(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_expense"])
            .start_timer();

        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        timer.observe_duration();
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(expense_id = id, "Expense deleted");
        }

        Ok(deleted)
    }
}
