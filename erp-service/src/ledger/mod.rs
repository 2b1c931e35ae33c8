//! Running-balance ledger: the single fold/merge routine behind supplier
//! statements, custody reports, project reports and employee payroll reports.
//!
//! Each account-like entity implements [`StatementSource`] to supply its
//! debit-like and credit-like rows; [`assemble_statement`] merges them and
//! folds the running balance oldest-first, then reverses the lines so the
//! returned sequence is newest-first for display.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use service_core::error::AppError;

/// Inclusive date-range filter compared against the transaction's own
/// business date, never the row's creation timestamp. An omitted bound
/// includes everything on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// A single transaction on an account's ledger. Exactly one of
/// `debit`/`credit` is non-zero.
#[derive(Debug, Clone, Serialize)]
pub struct StatementEntry {
    pub date: NaiveDate,
    pub description: String,
    pub debit: Decimal,
    pub credit: Decimal,
    /// Row creation time, used only to break same-day ordering ties.
    pub posted_utc: DateTime<Utc>,
}

impl StatementEntry {
    pub fn debit(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        posted_utc: DateTime<Utc>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            debit: amount,
            credit: Decimal::ZERO,
            posted_utc,
        }
    }

    pub fn credit(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        posted_utc: DateTime<Utc>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            debit: Decimal::ZERO,
            credit: amount,
            posted_utc,
        }
    }
}

/// One displayed statement row with its running balance.
#[derive(Debug, Clone, Serialize)]
pub struct StatementLine {
    pub date: NaiveDate,
    pub description: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub running_balance: Decimal,
}

/// A reconciled statement for one account over one date range.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    /// Newest-first for display; the balance fold ran oldest-first.
    pub lines: Vec<StatementLine>,
}

impl Statement {
    pub fn empty(opening_balance: Decimal) -> Self {
        Self {
            opening_balance,
            closing_balance: opening_balance,
            total_debits: Decimal::ZERO,
            total_credits: Decimal::ZERO,
            lines: Vec::new(),
        }
    }
}

/// Sorts entries oldest-first and folds
/// `balance_i = balance_{i-1} + debit_i − credit_i` from the opening balance.
/// Same-day entries order by posting time, then debits before credits, so the
/// ordering is deterministic for any input permutation.
pub fn build_statement(opening_balance: Decimal, mut entries: Vec<StatementEntry>) -> Statement {
    entries.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.posted_utc.cmp(&b.posted_utc))
            .then_with(|| a.debit.is_zero().cmp(&b.debit.is_zero()))
    });

    let mut balance = opening_balance;
    let mut total_debits = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;
    let mut lines = Vec::with_capacity(entries.len());

    for entry in entries {
        balance += entry.debit - entry.credit;
        total_debits += entry.debit;
        total_credits += entry.credit;
        lines.push(StatementLine {
            date: entry.date,
            description: entry.description,
            debit: entry.debit,
            credit: entry.credit,
            running_balance: balance,
        });
    }

    lines.reverse();

    Statement {
        opening_balance,
        closing_balance: balance,
        total_debits,
        total_credits,
        lines,
    }
}

/// The parameterized "ledger for an account-like entity" capability. One
/// implementation per account type feeds the shared fold.
#[async_trait]
pub trait StatementSource {
    /// Debit-like rows (increase the owed amount) inside the range.
    async fn fetch_debits(&self, range: DateRange) -> Result<Vec<StatementEntry>, AppError>;

    /// Credit-like rows (decrease the owed amount) inside the range.
    async fn fetch_credits(&self, range: DateRange) -> Result<Vec<StatementEntry>, AppError>;

    /// Balance carried into the statement: the fold of everything strictly
    /// before `before`, or the account's base amount when unbounded.
    async fn opening_balance(&self, before: Option<NaiveDate>) -> Result<Decimal, AppError>;
}

/// Fetches both sides of the ledger and folds them into a statement. An
/// account with no rows yields an empty statement at its opening balance.
pub async fn assemble_statement<S>(source: &S, range: DateRange) -> Result<Statement, AppError>
where
    S: StatementSource + Sync,
{
    let opening_balance = source.opening_balance(range.start).await?;
    let mut entries = source.fetch_debits(range).await?;
    entries.extend(source.fetch_credits(range).await?);
    Ok(build_statement(opening_balance, entries))
}
