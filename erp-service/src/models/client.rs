//! Client company model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientCompany {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating a client company.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClientCompany {
    #[validate(length(min = 1, message = "اسم الشركة مطلوب"))]
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
}

/// Partial update; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClientCompany {
    #[validate(length(min = 1, message = "اسم الشركة مطلوب"))]
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
}

/// Filter parameters for listing client companies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListClientsFilter {
    pub search: Option<String>,
}
