//! Statement sources: one [`StatementSource`] implementation per account-like
//! entity, all feeding the shared ledger fold. Balances are always folded
//! from the transaction rows on read; no stored balance field exists.

use crate::ledger::{
    assemble_statement, DateRange, Statement, StatementEntry, StatementSource,
};
use crate::models::{
    ListExpensesFilter, ListMaterialInvoicesFilter, ListPayrollFilter,
    ListSupplierInvoicesFilter, ListSupplierPaymentsFilter, PayrollEntryType,
};
use crate::services::metrics::STATEMENTS_BUILT;
use crate::services::Database;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use service_core::error::AppError;
use tracing::instrument;

fn invoice_description(invoice_number: Option<&str>) -> String {
    match invoice_number {
        Some(number) => format!("فاتورة رقم {number}"),
        None => "فاتورة".to_string(),
    }
}

fn payment_description(note: Option<&str>) -> String {
    match note {
        Some(note) => format!("دفعة - {note}"),
        None => "دفعة".to_string(),
    }
}

// -----------------------------------------------------------------------------
// Supplier statement: invoices debit at their full total_amount regardless of
// paid_amount (payments appear as their own credit rows), payments credit.
// -----------------------------------------------------------------------------

struct SupplierLedger<'a> {
    db: &'a Database,
    supplier_id: i64,
}

#[async_trait]
impl StatementSource for SupplierLedger<'_> {
    async fn fetch_debits(&self, range: DateRange) -> Result<Vec<StatementEntry>, AppError> {
        let invoices = self
            .db
            .list_supplier_invoices(&ListSupplierInvoicesFilter {
                supplier_id: Some(self.supplier_id),
                start_date: range.start,
                end_date: range.end,
                ..Default::default()
            })
            .await?;

        Ok(invoices
            .into_iter()
            .map(|invoice| {
                StatementEntry::debit(
                    invoice.invoice_date,
                    invoice_description(invoice.invoice_number.as_deref()),
                    invoice.total_amount,
                    invoice.created_utc,
                )
            })
            .collect())
    }

    async fn fetch_credits(&self, range: DateRange) -> Result<Vec<StatementEntry>, AppError> {
        let payments = self
            .db
            .list_supplier_payments(&ListSupplierPaymentsFilter {
                supplier_id: Some(self.supplier_id),
                start_date: range.start,
                end_date: range.end,
                ..Default::default()
            })
            .await?;

        Ok(payments
            .into_iter()
            .map(|payment| {
                StatementEntry::credit(
                    payment.payment_date,
                    payment_description(payment.note.as_deref()),
                    payment.amount,
                    payment.created_utc,
                )
            })
            .collect())
    }

    async fn opening_balance(&self, before: Option<NaiveDate>) -> Result<Decimal, AppError> {
        let Some(before) = before else {
            return Ok(Decimal::ZERO);
        };

        let balance: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE((SELECT SUM(total_amount) FROM supplier_invoices
                             WHERE supplier_id = $1 AND invoice_date < $2), 0::numeric)
                 - COALESCE((SELECT SUM(amount) FROM supplier_payments
                             WHERE supplier_id = $1 AND payment_date < $2), 0::numeric)
            "#,
        )
        .bind(self.supplier_id)
        .bind(before)
        .fetch_one(self.db.pool())
        .await?;

        Ok(balance)
    }
}

// -----------------------------------------------------------------------------
// Custody report: the budget is the base balance, additions debit, expenses
// drawing on the custody credit.
// -----------------------------------------------------------------------------

struct CustodyLedger<'a> {
    db: &'a Database,
    custody_id: i64,
}

impl CustodyLedger<'_> {
    async fn budget(&self) -> Result<Decimal, AppError> {
        let budget: Option<Decimal> =
            sqlx::query_scalar("SELECT budget FROM custodies WHERE id = $1")
                .bind(self.custody_id)
                .fetch_optional(self.db.pool())
                .await?;
        Ok(budget.unwrap_or(Decimal::ZERO))
    }
}

#[async_trait]
impl StatementSource for CustodyLedger<'_> {
    async fn fetch_debits(&self, range: DateRange) -> Result<Vec<StatementEntry>, AppError> {
        let additions = self.db.list_custody_additions(self.custody_id).await?;

        Ok(additions
            .into_iter()
            .filter(|addition| range.contains(addition.added_on))
            .map(|addition| {
                let description = match addition.note.as_deref() {
                    Some(note) => format!("إضافة رصيد - {note}"),
                    None => "إضافة رصيد".to_string(),
                };
                StatementEntry::debit(
                    addition.added_on,
                    description,
                    addition.amount,
                    addition.created_utc,
                )
            })
            .collect())
    }

    async fn fetch_credits(&self, range: DateRange) -> Result<Vec<StatementEntry>, AppError> {
        let expenses = self
            .db
            .list_expenses(&ListExpensesFilter {
                custody_id: Some(self.custody_id),
                start_date: range.start,
                end_date: range.end,
                ..Default::default()
            })
            .await?;

        Ok(expenses
            .into_iter()
            .map(|expense| {
                StatementEntry::credit(
                    expense.spent_on,
                    expense.description,
                    expense.amount,
                    expense.created_utc,
                )
            })
            .collect())
    }

    async fn opening_balance(&self, before: Option<NaiveDate>) -> Result<Decimal, AppError> {
        let budget = self.budget().await?;
        let Some(before) = before else {
            return Ok(budget);
        };

        let prior: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE((SELECT SUM(amount) FROM custody_additions
                             WHERE custody_id = $1 AND added_on < $2), 0::numeric)
                 - COALESCE((SELECT SUM(amount) FROM expenses
                             WHERE custody_id = $1 AND spent_on < $2), 0::numeric)
            "#,
        )
        .bind(self.custody_id)
        .bind(before)
        .fetch_one(self.db.pool())
        .await?;

        Ok(budget + prior)
    }
}

// -----------------------------------------------------------------------------
// Project report: material invoices billed for the project debit, expenses
// charged to the project credit.
// -----------------------------------------------------------------------------

struct ProjectLedger<'a> {
    db: &'a Database,
    project_id: i64,
}

#[async_trait]
impl StatementSource for ProjectLedger<'_> {
    async fn fetch_debits(&self, range: DateRange) -> Result<Vec<StatementEntry>, AppError> {
        let invoices = self
            .db
            .list_material_invoices(&ListMaterialInvoicesFilter {
                project_id: Some(self.project_id),
                start_date: range.start,
                end_date: range.end,
                ..Default::default()
            })
            .await?;

        Ok(invoices
            .into_iter()
            .map(|invoice| {
                let description = match invoice.invoice_number.as_deref() {
                    Some(number) => format!("فاتورة توريد رقم {number}"),
                    None => "فاتورة توريد".to_string(),
                };
                StatementEntry::debit(
                    invoice.invoice_date,
                    description,
                    invoice.total_amount,
                    invoice.created_utc,
                )
            })
            .collect())
    }

    async fn fetch_credits(&self, range: DateRange) -> Result<Vec<StatementEntry>, AppError> {
        let expenses = self
            .db
            .list_expenses(&ListExpensesFilter {
                project_id: Some(self.project_id),
                start_date: range.start,
                end_date: range.end,
                ..Default::default()
            })
            .await?;

        Ok(expenses
            .into_iter()
            .map(|expense| {
                StatementEntry::credit(
                    expense.spent_on,
                    expense.description,
                    expense.amount,
                    expense.created_utc,
                )
            })
            .collect())
    }

    async fn opening_balance(&self, before: Option<NaiveDate>) -> Result<Decimal, AppError> {
        let Some(before) = before else {
            return Ok(Decimal::ZERO);
        };

        let balance: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE((SELECT SUM(total_amount) FROM material_invoices
                             WHERE project_id = $1 AND invoice_date < $2), 0::numeric)
                 - COALESCE((SELECT SUM(amount) FROM expenses
                             WHERE project_id = $1 AND spent_on < $2), 0::numeric)
            "#,
        )
        .bind(self.project_id)
        .bind(before)
        .fetch_one(self.db.pool())
        .await?;

        Ok(balance)
    }
}

// -----------------------------------------------------------------------------
// Employee payroll report: salary/bonus entries debit, advance/deduction
// entries credit.
// -----------------------------------------------------------------------------

struct EmployeeLedger<'a> {
    db: &'a Database,
    employee_id: i64,
}

impl EmployeeLedger<'_> {
    async fn entries(
        &self,
        range: DateRange,
        debits: bool,
    ) -> Result<Vec<StatementEntry>, AppError> {
        let rows = self
            .db
            .list_payroll_entries(&ListPayrollFilter {
                employee_id: Some(self.employee_id),
                start_date: range.start,
                end_date: range.end,
                ..Default::default()
            })
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|entry| {
                let entry_type = PayrollEntryType::from_string(&entry.entry_type);
                if entry_type.is_debit() != debits {
                    return None;
                }
                let description = match entry.note.as_deref() {
                    Some(note) => format!("{} - {note}", entry_type.label_ar()),
                    None => entry_type.label_ar().to_string(),
                };
                Some(if debits {
                    StatementEntry::debit(entry.entry_date, description, entry.amount, entry.created_utc)
                } else {
                    StatementEntry::credit(entry.entry_date, description, entry.amount, entry.created_utc)
                })
            })
            .collect())
    }
}

#[async_trait]
impl StatementSource for EmployeeLedger<'_> {
    async fn fetch_debits(&self, range: DateRange) -> Result<Vec<StatementEntry>, AppError> {
        self.entries(range, true).await
    }

    async fn fetch_credits(&self, range: DateRange) -> Result<Vec<StatementEntry>, AppError> {
        self.entries(range, false).await
    }

    async fn opening_balance(&self, before: Option<NaiveDate>) -> Result<Decimal, AppError> {
        let Some(before) = before else {
            return Ok(Decimal::ZERO);
        };

        let balance: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE((SELECT SUM(amount) FROM payroll_entries
                             WHERE employee_id = $1 AND entry_date < $2
                               AND entry_type IN ('salary', 'bonus')), 0::numeric)
                 - COALESCE((SELECT SUM(amount) FROM payroll_entries
                             WHERE employee_id = $1 AND entry_date < $2
                               AND entry_type IN ('advance', 'deduction')), 0::numeric)
            "#,
        )
        .bind(self.employee_id)
        .bind(before)
        .fetch_one(self.db.pool())
        .await?;

        Ok(balance)
    }
}

// -----------------------------------------------------------------------------
// Statement assembly entry points
// -----------------------------------------------------------------------------

impl Database {
    /// Supplier account statement over the given range.
    #[instrument(skip(self))]
    pub async fn supplier_statement(
        &self,
        supplier_id: i64,
        range: DateRange,
    ) -> Result<Statement, AppError> {
        let source = SupplierLedger {
            db: self,
            supplier_id,
        };
        let statement = assemble_statement(&source, range).await?;
        STATEMENTS_BUILT.with_label_values(&["supplier"]).inc();
        Ok(statement)
    }

    /// Custody report over the given range; the budget carries in as the base
    /// of the opening balance.
    #[instrument(skip(self))]
    pub async fn custody_statement(
        &self,
        custody_id: i64,
        range: DateRange,
    ) -> Result<Statement, AppError> {
        let source = CustodyLedger { db: self, custody_id };
        let statement = assemble_statement(&source, range).await?;
        STATEMENTS_BUILT.with_label_values(&["custody"]).inc();
        Ok(statement)
    }

    /// Project report over the given range.
    #[instrument(skip(self))]
    pub async fn project_statement(
        &self,
        project_id: i64,
        range: DateRange,
    ) -> Result<Statement, AppError> {
        let source = ProjectLedger { db: self, project_id };
        let statement = assemble_statement(&source, range).await?;
        STATEMENTS_BUILT.with_label_values(&["project"]).inc();
        Ok(statement)
    }

    /// Employee payroll report over the given range.
    #[instrument(skip(self))]
    pub async fn employee_statement(
        &self,
        employee_id: i64,
        range: DateRange,
    ) -> Result<Statement, AppError> {
        let source = EmployeeLedger { db: self, employee_id };
        let statement = assemble_statement(&source, range).await?;
        STATEMENTS_BUILT.with_label_values(&["employee"]).inc();
        Ok(statement)
    }
}
