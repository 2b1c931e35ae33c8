//! Back-office ERP for a general-contracting company: employees, attendance
//! and payroll; suppliers, invoices and payments; client companies and
//! material invoices; inventory; petty-cash custodies; projects; expenses;
//! and printable Arabic statement reports.

pub mod config;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod services;
pub mod startup;
