//! Domain models for erp-service.

pub mod attendance;
pub mod client;
pub mod custody;
pub mod dashboard;
pub mod employee;
pub mod expense;
pub mod inventory;
pub mod material_invoice;
pub mod payroll;
pub mod project;
pub mod supplier;
pub mod supplier_invoice;
pub mod supplier_payment;

pub use attendance::{
    month_bounds, AttendanceFilter, AttendanceRecord, AttendanceStatus, CreateAttendance,
    UpdateAttendance,
};
pub use client::{ClientCompany, CreateClientCompany, ListClientsFilter, UpdateClientCompany};
pub use custody::{
    CreateCustody, CreateCustodyAddition, Custody, CustodyAddition, CustodySummary, UpdateCustody,
};
pub use dashboard::{Dashboard, DashboardCounts, DeadlineAlert, LowStockAlert};
pub use employee::{CreateEmployee, Employee, ListEmployeesFilter, UpdateEmployee};
pub use expense::{CreateExpense, Expense, ListExpensesFilter, UpdateExpense};
pub use inventory::{
    CreateInventoryItem, InventoryItem, ItemKind, ListInventoryFilter, UpdateInventoryItem,
};
pub use material_invoice::{
    CreateMaterialInvoice, ListMaterialInvoicesFilter, MaterialInvoice, MaterialInvoiceItem,
    MaterialInvoiceWithItems,
};
pub use payroll::{CreatePayrollEntry, ListPayrollFilter, PayrollEntry, PayrollEntryType};
pub use project::{CreateProject, ListProjectsFilter, Project, ProjectStatus, UpdateProject};
pub use supplier::{CreateSupplier, ListSuppliersFilter, Supplier, SupplierAccount, UpdateSupplier};
pub use supplier_invoice::{
    CreateInvoiceItem, CreateSupplierInvoice, InvoiceItem, InvoiceStatus, InvoiceWithItems,
    ListSupplierInvoicesFilter, SupplierInvoice,
};
pub use supplier_payment::{CreateSupplierPayment, ListSupplierPaymentsFilter, SupplierPayment};

use rust_decimal::Decimal;
use validator::ValidationError;

/// Shared rule for money and quantity fields that must be strictly positive.
pub(crate) fn amount_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("amount_positive").with_message("المبلغ يجب أن يكون أكبر من صفر".into()))
    }
}

/// Shared rule for money fields that may be zero but never negative.
pub(crate) fn amount_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("amount_non_negative").with_message("المبلغ لا يمكن أن يكون سالباً".into()))
    }
}
