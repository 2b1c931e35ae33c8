//! HTTP handlers for erp-service, one module per resource.

pub mod attendance;
pub mod clients;
pub mod custodies;
pub mod dashboard;
pub mod employees;
pub mod expenses;
pub mod inventory;
pub mod material_invoices;
pub mod payroll;
pub mod projects;
pub mod supplier_invoices;
pub mod supplier_payments;
pub mod suppliers;

use crate::ledger::DateRange;
use crate::models::CreateInvoiceItem;
use crate::startup::AppState;
use axum::routing::{delete, get, post, put};
use axum::Router;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use service_core::error::AppError;

/// `start_date`/`end_date` query parameters on statement, report and list
/// routes. Both bounds are inclusive business dates.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRangeQuery {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Resolves an invoice total from the declared amount and the line items.
/// Items alone are summed; a declared total alone is taken as-is; when both
/// are given they must agree.
pub(crate) fn resolve_invoice_total(
    declared: Option<Decimal>,
    items: &[CreateInvoiceItem],
) -> Result<Decimal, AppError> {
    let items_total: Decimal = items.iter().map(CreateInvoiceItem::line_total).sum();
    match declared {
        None if items.is_empty() => Err(AppError::BadRequest(anyhow::anyhow!(
            "إجمالي الفاتورة مطلوب عند عدم إدخال أصناف"
        ))),
        None => Ok(items_total),
        Some(total) if !items.is_empty() && total != items_total => {
            Err(AppError::BadRequest(anyhow::anyhow!(
                "إجمالي الفاتورة لا يطابق مجموع الأصناف"
            )))
        }
        Some(total) => Ok(total),
    }
}

pub fn api_router() -> Router<AppState> {
    Router::new()
        // Employees, attendance, payroll
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/employees/:id",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route("/employees/:id/report", get(employees::payroll_report))
        .route(
            "/employees/:id/report/print",
            get(employees::print_payroll_report),
        )
        .route(
            "/attendance",
            get(attendance::list_attendance).post(attendance::create_attendance),
        )
        .route(
            "/attendance/:id",
            put(attendance::update_attendance).delete(attendance::delete_attendance),
        )
        .route(
            "/payroll",
            get(payroll::list_payroll_entries).post(payroll::create_payroll_entry),
        )
        .route("/payroll/:id", delete(payroll::delete_payroll_entry))
        // Suppliers, invoices, payments
        .route(
            "/suppliers",
            get(suppliers::list_suppliers).post(suppliers::create_supplier),
        )
        .route(
            "/suppliers/:id",
            get(suppliers::get_supplier)
                .put(suppliers::update_supplier)
                .delete(suppliers::delete_supplier),
        )
        .route("/suppliers/:id/statement", get(suppliers::supplier_statement))
        .route(
            "/suppliers/:id/statement/print",
            get(suppliers::print_supplier_statement),
        )
        .route(
            "/supplier-invoices",
            get(supplier_invoices::list_invoices).post(supplier_invoices::create_invoice),
        )
        .route(
            "/supplier-invoices/:id",
            get(supplier_invoices::get_invoice).delete(supplier_invoices::delete_invoice),
        )
        .route(
            "/supplier-payments",
            get(supplier_payments::list_payments).post(supplier_payments::create_payment),
        )
        // Clients and material invoices
        .route(
            "/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/clients/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/material-invoices",
            get(material_invoices::list_invoices).post(material_invoices::create_invoice),
        )
        .route(
            "/material-invoices/:id",
            get(material_invoices::get_invoice).delete(material_invoices::delete_invoice),
        )
        // Inventory
        .route(
            "/inventory",
            get(inventory::list_items).post(inventory::create_item),
        )
        .route(
            "/inventory/:id",
            get(inventory::get_item)
                .put(inventory::update_item)
                .delete(inventory::delete_item),
        )
        // Custodies
        .route(
            "/custodies",
            get(custodies::list_custodies).post(custodies::create_custody),
        )
        .route(
            "/custodies/:id",
            get(custodies::get_custody)
                .put(custodies::update_custody)
                .delete(custodies::delete_custody),
        )
        .route("/custodies/:id/additions", post(custodies::create_addition))
        .route("/custodies/:id/report", get(custodies::custody_report))
        .route(
            "/custodies/:id/report/print",
            get(custodies::print_custody_report),
        )
        // Projects
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/projects/:id/report", get(projects::project_report))
        .route(
            "/projects/:id/report/print",
            get(projects::print_project_report),
        )
        // Expenses
        .route(
            "/expenses",
            get(expenses::list_expenses).post(expenses::create_expense),
        )
        .route("/expenses/export", get(expenses::export_expenses))
        .route(
            "/expenses/:id",
            get(expenses::get_expense)
                .put(expenses::update_expense)
                .delete(expenses::delete_expense),
        )
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
}
