//! Inventory item operations. The low-stock filter is computed from the
//! fetched rows so the threshold lives in one place, `InventoryItem::is_low_stock`.

use crate::models::{
    CreateInventoryItem, InventoryItem, ListInventoryFilter, UpdateInventoryItem,
};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::Database;
use service_core::error::AppError;
use tracing::{info, instrument};

impl Database {
    #[instrument(skip(self, input))]
    pub async fn create_inventory_item(
        &self,
        input: &CreateInventoryItem,
    ) -> Result<InventoryItem, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_inventory_item"])
            .start_timer();

        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory_items (name, kind, unit, base_quantity, stock)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, kind, unit, base_quantity, stock, created_utc
            "#,
        )
        .bind(&input.name)
        .bind(input.kind.as_str())
        .bind(&input.unit)
        .bind(input.base_quantity)
        .bind(input.stock)
        .fetch_one(self.pool())
        .await?;

        timer.observe_duration();
        info!(item_id = item.id, "Inventory item created");

        Ok(item)
    }

    #[instrument(skip(self, filter))]
    pub async fn list_inventory_items(
        &self,
        filter: &ListInventoryFilter,
        low_stock_percent: u32,
    ) -> Result<Vec<InventoryItem>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_inventory_items"])
            .start_timer();

        let mut items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, name, kind, unit, base_quantity, stock, created_utc
            FROM inventory_items
            WHERE ($1::text IS NULL OR kind = $1)
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
            ORDER BY name, id
            "#,
        )
        .bind(filter.kind.map(|k| k.as_str()))
        .bind(&filter.search)
        .fetch_all(self.pool())
        .await?;

        if filter.low_stock == Some(true) {
            items.retain(|item| item.is_low_stock(low_stock_percent));
        }

        timer.observe_duration();

        Ok(items)
    }

    #[instrument(skip(self))]
    pub async fn get_inventory_item(&self, id: i64) -> Result<Option<InventoryItem>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_inventory_item"])
            .start_timer();

        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, name, kind, unit, base_quantity, stock, created_utc
            FROM inventory_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();

        Ok(item)
    }

    #[instrument(skip(self, input))]
    pub async fn update_inventory_item(
        &self,
        id: i64,
        input: &UpdateInventoryItem,
    ) -> Result<Option<InventoryItem>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_inventory_item"])
            .start_timer();

        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items
            SET name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                unit = COALESCE($4, unit),
                base_quantity = COALESCE($5, base_quantity),
                stock = COALESCE($6, stock)
            WHERE id = $1
            RETURNING id, name, kind, unit, base_quantity, stock, created_utc
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.kind.map(|k| k.as_str()))
        .bind(&input.unit)
        .bind(input.base_quantity)
        .bind(input.stock)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();
        if item.is_some() {
            info!(item_id = id, "Inventory item updated");
        }

        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn delete_inventory_item(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_inventory_item"])
            .start_timer();

        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        timer.observe_duration();
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(item_id = id, "Inventory item deleted");
        }

        Ok(deleted)
    }
}
