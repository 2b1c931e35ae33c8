//! Services module for erp-service. The `Database` pool wrapper lives in
//! `database`; each domain contributes its own `impl Database` block.

pub mod clients;
pub mod custodies;
pub mod dashboard;
pub mod database;
pub mod employees;
pub mod expenses;
pub mod inventory;
pub mod metrics;
pub mod projects;
pub mod statements;
pub mod suppliers;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
