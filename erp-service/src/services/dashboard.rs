//! Dashboard aggregation: entity counts plus low-stock and deadline alerts.

use crate::models::{Dashboard, DashboardCounts, DeadlineAlert, ListInventoryFilter, LowStockAlert};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::Database;
use chrono::NaiveDate;
use service_core::error::AppError;
use tracing::instrument;

impl Database {
    #[instrument(skip(self))]
    pub async fn dashboard(
        &self,
        today: NaiveDate,
        low_stock_percent: u32,
        deadline_window_days: i64,
    ) -> Result<Dashboard, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["dashboard"])
            .start_timer();

        let counts = self.dashboard_counts().await?;
        let low_stock = self.low_stock_alerts(low_stock_percent).await?;
        let approaching_deadlines = self
            .deadline_alerts(today, deadline_window_days)
            .await?;

        timer.observe_duration();

        Ok(Dashboard {
            counts,
            low_stock,
            approaching_deadlines,
        })
    }

    async fn dashboard_counts(&self) -> Result<DashboardCounts, AppError> {
        let (employees, suppliers, clients, projects, custodies, inventory_items): (
            i64,
            i64,
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT (SELECT COUNT(*) FROM employees WHERE active),
                   (SELECT COUNT(*) FROM suppliers),
                   (SELECT COUNT(*) FROM client_companies),
                   (SELECT COUNT(*) FROM projects WHERE status = 'active'),
                   (SELECT COUNT(*) FROM custodies),
                   (SELECT COUNT(*) FROM inventory_items)
            "#,
        )
        .fetch_one(self.pool())
        .await?;

        Ok(DashboardCounts {
            employees,
            suppliers,
            clients,
            projects,
            custodies,
            inventory_items,
        })
    }

    async fn low_stock_alerts(
        &self,
        low_stock_percent: u32,
    ) -> Result<Vec<LowStockAlert>, AppError> {
        let items = self
            .list_inventory_items(
                &ListInventoryFilter {
                    low_stock: Some(true),
                    ..Default::default()
                },
                low_stock_percent,
            )
            .await?;

        Ok(items
            .into_iter()
            .map(|item| {
                let percent = item.stock_percent();
                LowStockAlert {
                    id: item.id,
                    name: item.name,
                    stock: item.stock,
                    base_quantity: item.base_quantity,
                    percent,
                }
            })
            .collect())
    }

    async fn deadline_alerts(
        &self,
        today: NaiveDate,
        window_days: i64,
    ) -> Result<Vec<DeadlineAlert>, AppError> {
        let rows: Vec<(i64, String, NaiveDate)> = sqlx::query_as(
            r#"
            SELECT id, name, deadline
            FROM projects
            WHERE status = 'active'
              AND deadline IS NOT NULL
              AND deadline <= $1
            ORDER BY deadline, id
            "#,
        )
        .bind(today + chrono::Duration::days(window_days))
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, deadline)| DeadlineAlert::new(id, name, deadline, today))
            .collect())
    }
}
