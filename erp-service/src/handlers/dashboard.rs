//! Dashboard handler.

use axum::{extract::State, Json};
use chrono::Utc;
use service_core::error::AppError;

use crate::models::Dashboard;
use crate::startup::AppState;

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, AppError> {
    let today = Utc::now().date_naive();
    let dashboard = state
        .db
        .dashboard(
            today,
            state.config.business.low_stock_percent,
            state.config.business.deadline_window_days,
        )
        .await?;
    Ok(Json(dashboard))
}
