//! Client company operations and the material invoices billed to them.

use crate::models::{
    ClientCompany, CreateClientCompany, CreateMaterialInvoice, ListClientsFilter,
    ListMaterialInvoicesFilter, MaterialInvoice, MaterialInvoiceItem, MaterialInvoiceWithItems,
    UpdateClientCompany,
};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::Database;
use rust_decimal::Decimal;
use service_core::error::AppError;
use tracing::{info, instrument};

impl Database {
    // -------------------------------------------------------------------------
    // Client Company Operations
    // -------------------------------------------------------------------------

    #[instrument(skip(self, input))]
    pub async fn create_client(&self, input: &CreateClientCompany) -> Result<ClientCompany, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_client"])
            .start_timer();

        let client = sqlx::query_as::<_, ClientCompany>(
            r#"
            INSERT INTO client_companies (name, contact_person, phone)
            VALUES ($1, $2, $3)
            RETURNING id, name, contact_person, phone, created_utc
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact_person)
        .bind(&input.phone)
        .fetch_one(self.pool())
        .await?;

        timer.observe_duration();
        info!(client_id = client.id, "Client company created");

        Ok(client)
    }

    #[instrument(skip(self, filter))]
    pub async fn list_clients(
        &self,
        filter: &ListClientsFilter,
    ) -> Result<Vec<ClientCompany>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_clients"])
            .start_timer();

        let clients = sqlx::query_as::<_, ClientCompany>(
            r#"
            SELECT id, name, contact_person, phone, created_utc
            FROM client_companies
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY name, id
            "#,
        )
        .bind(&filter.search)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(clients)
    }

    #[instrument(skip(self))]
    pub async fn get_client(&self, id: i64) -> Result<Option<ClientCompany>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_client"])
            .start_timer();

        let client = sqlx::query_as::<_, ClientCompany>(
            r#"
            SELECT id, name, contact_person, phone, created_utc
            FROM client_companies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();

        Ok(client)
    }

    #[instrument(skip(self, input))]
    pub async fn update_client(
        &self,
        id: i64,
        input: &UpdateClientCompany,
    ) -> Result<Option<ClientCompany>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_client"])
            .start_timer();

        let client = sqlx::query_as::<_, ClientCompany>(
            r#"
            UPDATE client_companies
            SET name = COALESCE($2, name),
                contact_person = COALESCE($3, contact_person),
                phone = COALESCE($4, phone)
            WHERE id = $1
            RETURNING id, name, contact_person, phone, created_utc
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.contact_person)
        .bind(&input.phone)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();
        if client.is_some() {
            info!(client_id = id, "Client company updated");
        }

        Ok(client)
    }

    #[instrument(skip(self))]
    pub async fn delete_client(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_client"])
            .start_timer();

        let result = sqlx::query("DELETE FROM client_companies WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        timer.observe_duration();
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(client_id = id, "Client company deleted");
        }

        Ok(deleted)
    }

    // -------------------------------------------------------------------------
    // Material Invoice Operations
    // -------------------------------------------------------------------------

    /// Creates a material invoice and its line items in one transaction.
    #[instrument(skip(self, input), fields(client_id = input.client_id))]
    pub async fn create_material_invoice(
        &self,
        input: &CreateMaterialInvoice,
        total_amount: Decimal,
    ) -> Result<MaterialInvoiceWithItems, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_material_invoice"])
            .start_timer();

        let mut tx = self.pool().begin().await?;

        let invoice = sqlx::query_as::<_, MaterialInvoice>(
            r#"
            INSERT INTO material_invoices (client_id, project_id, invoice_number, invoice_date, total_amount, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, client_id, project_id, invoice_number, invoice_date, total_amount,
                      notes, created_utc
            "#,
        )
        .bind(input.client_id)
        .bind(input.project_id)
        .bind(&input.invoice_number)
        .bind(input.invoice_date)
        .bind(total_amount)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let row = sqlx::query_as::<_, MaterialInvoiceItem>(
                r#"
                INSERT INTO material_invoice_items (invoice_id, item_name, quantity, unit_price)
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
            client_id = invoice.client_id,
            total_amount = %invoice.total_amount,
            items = items.len(),
            "Material invoice created"
        );

        Ok(MaterialInvoiceWithItems { invoice, items })
    }

    #[instrument(skip(self, filter))]
    pub async fn list_material_invoices(
        &self,
        filter: &ListMaterialInvoicesFilter,
    ) -> Result<Vec<MaterialInvoice>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_material_invoices"])
            .start_timer();

        let invoices = sqlx::query_as::<_, MaterialInvoice>(
            r#"
            SELECT id, client_id, project_id, invoice_number, invoice_date, total_amount,
                   notes, created_utc
            FROM material_invoices
            WHERE ($1::bigint IS NULL OR client_id = $1)
              AND ($2::bigint IS NULL OR project_id = $2)
              AND ($3::date IS NULL OR invoice_date >= $3)
              AND ($4::date IS NULL OR invoice_date <= $4)
            ORDER BY invoice_date DESC, id DESC
            "#,
        )
        .bind(filter.client_id)
        .bind(filter.project_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(invoices)
    }

    #[instrument(skip(self))]
    pub async fn get_material_invoice(
        &self,
        id: i64,
    ) -> Result<Option<MaterialInvoiceWithItems>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_material_invoice"])
            .start_timer();

        let invoice = sqlx::query_as::<_, MaterialInvoice>(
            r#"
            SELECT id, client_id, project_id, invoice_number, invoice_date, total_amount,
                   notes, created_utc
            FROM material_invoices
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

        let items = sqlx::query_as::<_, MaterialInvoiceItem>(
            r#"
            SELECT id, invoice_id, item_name, quantity, unit_price
            FROM material_invoice_items
            WHERE invoice_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(Some(MaterialInvoiceWithItems { invoice, items }))
    }

    #[instrument(skip(self))]
    pub async fn delete_material_invoice(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_material_invoice"])
            .start_timer();

        let result = sqlx::query("DELETE FROM material_invoices WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        timer.observe_duration();
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(invoice_id = id, "Material invoice deleted");
        }

        Ok(deleted)
    }
}
