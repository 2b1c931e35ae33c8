//! Supplier operations: the supplier ledger's write side. Invoices post the
//! debit side, payments the credit side; multi-row writes share one
//! transaction so the ledger never half-updates.

use crate::models::{
    CreateSupplier, CreateSupplierInvoice, CreateSupplierPayment, InvoiceItem, InvoiceStatus,
    InvoiceWithItems, ListSupplierInvoicesFilter, ListSupplierPaymentsFilter,
    ListSuppliersFilter, Supplier, SupplierAccount, SupplierInvoice, SupplierPayment,
    UpdateSupplier,
};
use crate::services::metrics::{DB_QUERY_DURATION, PAYMENTS_RECORDED};
use crate::services::Database;
use rust_decimal::Decimal;
use service_core::error::AppError;
use tracing::{info, instrument, warn};

impl Database {
    // -------------------------------------------------------------------------
    // Supplier Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, input))]
    pub async fn create_supplier(&self, input: &CreateSupplier) -> Result<Supplier, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_supplier"])
            .start_timer();

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, phone, address)
            VALUES ($1, $2, $3)
            RETURNING id, name, phone, address, created_utc
            "#,
        )
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(self.pool())
        .await?;

        timer.observe_duration();
        info!(supplier_id = supplier.id, "Supplier created");

        Ok(supplier)
    }

    /// Lists suppliers with their balances folded from the transaction log.
    #[instrument(skip(self, filter))]
    pub async fn list_suppliers(
        &self,
        filter: &ListSuppliersFilter,
    ) -> Result<Vec<SupplierAccount>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_suppliers"])
            .start_timer();

        let suppliers = sqlx::query_as::<_, SupplierAccount>(
            r#"
            SELECT s.id, s.name, s.phone, s.address, s.created_utc,
                   COALESCE(inv.total, 0::numeric) - COALESCE(pay.total, 0::numeric) AS balance
            FROM suppliers s
            LEFT JOIN (
                SELECT supplier_id, SUM(total_amount) AS total
                FROM supplier_invoices GROUP BY supplier_id
            ) inv ON inv.supplier_id = s.id
            LEFT JOIN (
                SELECT supplier_id, SUM(amount) AS total
                FROM supplier_payments GROUP BY supplier_id
            ) pay ON pay.supplier_id = s.id
            WHERE ($1::text IS NULL OR s.name ILIKE '%' || $1 || '%')
            ORDER BY s.name, s.id
            "#,
        )
        .bind(&filter.search)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(suppliers)
    }

    #[instrument(skip(self))]
    pub async fn get_supplier(&self, id: i64) -> Result<Option<SupplierAccount>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_supplier"])
            .start_timer();

        let supplier = sqlx::query_as::<_, SupplierAccount>(
            r#"
            SELECT s.id, s.name, s.phone, s.address, s.created_utc,
                   COALESCE((SELECT SUM(total_amount) FROM supplier_invoices WHERE supplier_id = s.id), 0::numeric)
                 - COALESCE((SELECT SUM(amount) FROM supplier_payments WHERE supplier_id = s.id), 0::numeric) AS balance
            FROM suppliers s
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();

        Ok(supplier)
    }

    #[instrument(skip(self, input))]
    pub async fn update_supplier(
        &self,
        id: i64,
        input: &UpdateSupplier,
    ) -> Result<Option<Supplier>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_supplier"])
            .start_timer();

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address)
            WHERE id = $1
            RETURNING id, name, phone, address, created_utc
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();
        if supplier.is_some() {
            info!(supplier_id = id, "Supplier updated");
        }

        Ok(supplier)
    }

    #[instrument(skip(self))]
    pub async fn delete_supplier(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_supplier"])
            .start_timer();

        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        timer.observe_duration();
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(supplier_id = id, "Supplier deleted");
        }

        Ok(deleted)
    }

    // -------------------------------------------------------------------------
    // Supplier Invoice Operations
    // -------------------------------------------------------------------------

    /// Creates an invoice and its line items in one transaction.
    #[instrument(skip(self, input), fields(supplier_id = input.supplier_id))]
    pub async fn create_supplier_invoice(
        &self,
        input: &CreateSupplierInvoice,
        total_amount: Decimal,
    ) -> Result<InvoiceWithItems, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_supplier_invoice"])
            .start_timer();

        let mut tx = self.pool().begin().await?;

        let invoice = sqlx::query_as::<_, SupplierInvoice>(
            r#"
            INSERT INTO supplier_invoices (supplier_id, invoice_number, invoice_date, total_amount, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, supplier_id, invoice_number, invoice_date, total_amount, paid_amount,
                      status, notes, created_utc
            "#,
        )
        .bind(input.supplier_id)
        .bind(&input.invoice_number)
        .bind(input.invoice_date)
        .bind(total_amount)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let row = sqlx::query_as::<_, InvoiceItem>(
                r#"
                INSERT INTO invoice_items (invoice_id, item_name, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, invoice_id, item_name, quantity, unit_price
                "#,
            )
            .bind(invoice.id)
            .bind(&item.item_name)
            .bind(item.quantity)
            .bind(item.unit_price)
            .fetch_one(&mut *tx)
            .await?;
            items.push(row);
        }

        tx.commit().await?;

        timer.observe_duration();
        info!(
            invoice_id = invoice.id,
            supplier_id = invoice.supplier_id,
            total_amount = %invoice.total_amount,
            items = items.len(),
            "Supplier invoice created"
        );

        Ok(InvoiceWithItems { invoice, items })
    }

    #[instrument(skip(self, filter))]
    pub async fn list_supplier_invoices(
        &self,
        filter: &ListSupplierInvoicesFilter,
    ) -> Result<Vec<SupplierInvoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_supplier_invoices"])
            .start_timer();

        let invoices = sqlx::query_as::<_, SupplierInvoice>(
            r#"
            SELECT id, supplier_id, invoice_number, invoice_date, total_amount, paid_amount,
                   status, notes, created_utc
            FROM supplier_invoices
            WHERE ($1::bigint IS NULL OR supplier_id = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::date IS NULL OR invoice_date >= $3)
              AND ($4::date IS NULL OR invoice_date <= $4)
              AND ($5::text IS NULL OR invoice_number ILIKE '%' || $5 || '%')
            ORDER BY invoice_date DESC, id DESC
            "#,
        )
        .bind(filter.supplier_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(&filter.search)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(invoices)
    }

    #[instrument(skip(self))]
    pub async fn get_supplier_invoice(&self, id: i64) -> Result<Option<InvoiceWithItems>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_supplier_invoice"])
            .start_timer();

        let invoice = sqlx::query_as::<_, SupplierInvoice>(
            r#"
            SELECT id, supplier_id, invoice_number, invoice_date, total_amount, paid_amount,
                   status, notes, created_utc
            FROM supplier_invoices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        let Some(invoice) = invoice else {
            timer.observe_duration();
            return Ok(None);
        };

        let items = sqlx::query_as::<_, InvoiceItem>(
            r#"
            SELECT id, invoice_id, item_name, quantity, unit_price
            FROM invoice_items
            WHERE invoice_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(Some(InvoiceWithItems { invoice, items }))
    }

    /// Deletes an invoice that has no recorded payments. An invoice with any
    /// payment history is part of the ledger and refuses deletion.
    #[instrument(skip(self))]
    pub async fn delete_supplier_invoice(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_supplier_invoice"])
            .start_timer();

        let mut tx = self.pool().begin().await?;

        let invoice = sqlx::query_as::<_, SupplierInvoice>(
            r#"
            SELECT id, supplier_id, invoice_number, invoice_date, total_amount, paid_amount,
                   status, notes, created_utc
            FROM supplier_invoices
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(invoice) = invoice else {
            timer.observe_duration();
            return Ok(false);
        };

        let payment_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM supplier_payments WHERE invoice_id = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if payment_count > 0 || invoice.paid_amount > Decimal::ZERO {
            timer.observe_duration();
            return Err(AppError::Conflict(anyhow::anyhow!(
                "لا يمكن حذف فاتورة مسجل عليها دفعات"
            )));
        }

        sqlx::query("DELETE FROM supplier_invoices WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        timer.observe_duration();
        info!(invoice_id = id, "Supplier invoice deleted");

        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Supplier Payment Operations
    // -------------------------------------------------------------------------

    /// Records a payment. When tied to an invoice, the invoice's paid amount
    /// and status move in the same transaction as the payment insert, and a
    /// payment above the remaining amount is rejected.
    #[instrument(skip(self, input), fields(supplier_id = input.supplier_id))]
    pub async fn record_supplier_payment(
        &self,
        input: &CreateSupplierPayment,
    ) -> Result<SupplierPayment, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["record_supplier_payment"])
            .start_timer();

        let mut tx = self.pool().begin().await?;

        if let Some(invoice_id) = input.invoice_id {
            let invoice = sqlx::query_as::<_, SupplierInvoice>(
                r#"
                SELECT id, supplier_id, invoice_number, invoice_date, total_amount, paid_amount,
                       status, notes, created_utc
                FROM supplier_invoices
                WHERE id = $1
                FOR UPDATE
                "#,
            )
            .bind(invoice_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("الفاتورة غير موجودة")))?;

            if invoice.supplier_id != input.supplier_id {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "الفاتورة لا تخص هذا المورد"
                )));
            }

            let remaining = invoice.remaining();
            if input.amount > remaining {
                PAYMENTS_RECORDED.with_label_values(&["rejected"]).inc();
                warn!(
                    invoice_id = invoice.id,
                    amount = %input.amount,
                    remaining = %remaining,
                    "Payment exceeds remaining amount"
                );
                return Err(AppError::Conflict(anyhow::anyhow!(
                    "المبلغ المدفوع يتجاوز المتبقي على الفاتورة"
                )));
            }

            let new_paid = invoice.paid_amount + input.amount;
            let new_status = InvoiceStatus::for_paid_amount(new_paid, invoice.total_amount);

            sqlx::query(
                "UPDATE supplier_invoices SET paid_amount = $2, status = $3 WHERE id = $1",
            )
            .bind(invoice.id)
            .bind(new_paid)
            .bind(new_status.as_str())
            .execute(&mut *tx)
            .await?;
        }

        let payment = sqlx::query_as::<_, SupplierPayment>(
            r#"
            INSERT INTO supplier_payments (supplier_id, invoice_id, amount, payment_date, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, supplier_id, invoice_id, amount, payment_date, note, created_utc
            "#,
        )
        .bind(input.supplier_id)
        .bind(input.invoice_id)
        .bind(input.amount)
        .bind(input.payment_date)
        .bind(&input.note)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        timer.observe_duration();
        PAYMENTS_RECORDED.with_label_values(&["recorded"]).inc();
        info!(
            payment_id = payment.id,
            supplier_id = payment.supplier_id,
            invoice_id = payment.invoice_id,
            amount = %payment.amount,
            "Supplier payment recorded"
        );

        Ok(payment)
    }

    #[instrument(skip(self, filter))]
    pub async fn list_supplier_payments(
        &self,
        filter: &ListSupplierPaymentsFilter,
    ) -> Result<Vec<SupplierPayment>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_supplier_payments"])
            .start_timer();

        let payments = sqlx::query_as::<_, SupplierPayment>(
            r#"
            SELECT id, supplier_id, invoice_id, amount, payment_date, note, created_utc
            FROM supplier_payments
            WHERE ($1::bigint IS NULL OR supplier_id = $1)
              AND ($2::bigint IS NULL OR invoice_id = $2)
              AND ($3::date IS NULL OR payment_date >= $3)
              AND ($4::date IS NULL OR payment_date <= $4)
            ORDER BY payment_date DESC, id DESC
            "#,
        )
        .bind(filter.supplier_id)
        .bind(filter.invoice_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(payments)
    }
}
