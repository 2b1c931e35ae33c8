//! Project model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Project status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on_hold",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "completed" => ProjectStatus::Completed,
            "on_hold" => ProjectStatus::OnHold,
            _ => ProjectStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client_id: Option<i64>,
    pub location: Option<String>,
    pub budget: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub status: String,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, message = "اسم المشروع مطلوب"))]
    pub name: String,
    pub client_id: Option<i64>,
    pub location: Option<String>,
    #[validate(custom(function = "crate::models::amount_non_negative"))]
    pub budget: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
}

/// Partial update; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, message = "اسم المشروع مطلوب"))]
    pub name: Option<String>,
    pub client_id: Option<i64>,
    pub location: Option<String>,
    #[validate(custom(function = "crate::models::amount_non_negative"))]
    pub budget: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
}

/// Filter parameters for listing projects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProjectsFilter {
    pub status: Option<ProjectStatus>,
    pub client_id: Option<i64>,
    pub search: Option<String>,
}
