use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewOrderItem, OrderItem, OrderItemUpdate},
    market_api::errors::OrderManagerError,
    traits::OrderItemManagement,
};

/// `OrderItemApi` manages individual line items. Every mutation recomputes
/// the parent order's stored total from a full re-read of the remaining
/// items, so the aggregate always reflects the item set that was current when
/// the mutation committed.
pub struct OrderItemApi<B> {
    db: B,
}

impl<B> Debug for OrderItemApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderItemApi")
    }
}

impl<B> OrderItemApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderItemApi<B>
where B: OrderItemManagement
{
    /// Adds a line item to an existing order. The payload must carry the
    /// parent `OrderId`. Returns the new item id.
    pub async fn add_item(&self, item: NewOrderItem) -> Result<i64, OrderManagerError> {
        let order_id = item.order_id.ok_or(OrderManagerError::MissingOrderId)?;
        let item_id = self
            .db
            .insert_order_item(order_id, item)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?;
        debug!("🔄️🧾️ Item {item_id} added to order {order_id}");
        Ok(item_id)
    }

    pub async fn items_for_order(&self, order_id: i64) -> Result<Vec<OrderItem>, OrderManagerError> {
        self.db
            .fetch_items_for_order(order_id)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))
    }

    /// Patches a line item. The stored line total and the parent order's
    /// aggregate are both recomputed as part of the same flow. An update with
    /// no fields present is a no-op that reports success.
    pub async fn update_item(&self, item_id: i64, update: OrderItemUpdate) -> Result<(), OrderManagerError> {
        if update.is_empty() {
            debug!("🔄️🧾️ No fields to update for item {item_id}. Update request skipped.");
            return Ok(());
        }
        let rows = self
            .db
            .update_order_item(item_id, update)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?;
        if rows == 0 {
            return Err(OrderManagerError::ItemNotFound(item_id));
        }
        Ok(())
    }

    /// Deletes a line item and recomputes the parent order's total from the
    /// remaining items. Returns the parent order id.
    pub async fn remove_item(&self, item_id: i64) -> Result<i64, OrderManagerError> {
        let order_id = self
            .db
            .delete_order_item(item_id)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?
            .ok_or(OrderManagerError::ItemNotFound(item_id))?;
        debug!("🔄️🧾️ Item {item_id} removed from order {order_id}");
        Ok(order_id)
    }
}
