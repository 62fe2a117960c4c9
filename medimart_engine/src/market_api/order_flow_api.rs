use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewOrder, Order, OrderStatusType, OrderUpdate},
    market_api::{
        errors::OrderManagerError,
        order_objects::{CustomerOrderSummary, OrderDetails, OrderQueryFilter, RetailerOrderSummary},
    },
    traits::{CustomerManagement, OrderItemManagement, OrderManagement},
};

/// `OrderFlowApi` is the primary API for the order lifecycle: creation with
/// nested line items, composite detail views, status summaries, updates and
/// cascading deletes.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement + OrderItemManagement + CustomerManagement
{
    /// Submit a new order. The order row, its line items and the summed total
    /// are written in a single atomic flow by the backend. Returns the new
    /// order id.
    pub async fn create_order(&self, order: NewOrder) -> Result<i64, OrderManagerError> {
        let item_count = order.items.len();
        let order_id = self
            .db
            .insert_order(order)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?;
        debug!("🔄️📦️ Order {order_id} created with {item_count} items");
        Ok(order_id)
    }

    /// Assembles the composite view for one order: the order row, the owning
    /// customer and the line items.
    pub async fn order_details(&self, order_id: i64) -> Result<OrderDetails, OrderManagerError> {
        let order = self
            .db
            .fetch_order_by_id(order_id)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?
            .ok_or(OrderManagerError::OrderNotFound(order_id))?;
        let items = self
            .db
            .fetch_items_for_order(order_id)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?;
        let customer = self
            .db
            .fetch_customer_by_id(order.customer_id)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?;
        Ok(OrderDetails { order, customer, items })
    }

    /// All orders for the given customer (or every order when `customer_id`
    /// is `None`), with the derived status counts.
    pub async fn orders_for_customer(
        &self,
        customer_id: Option<i64>,
    ) -> Result<CustomerOrderSummary, OrderManagerError> {
        let mut query = OrderQueryFilter::default();
        if let Some(customer_id) = customer_id {
            query = query.with_customer_id(customer_id);
        }
        let orders = self
            .db
            .fetch_orders(query)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?;
        Ok(CustomerOrderSummary::from_orders(orders))
    }

    /// All orders for the given retailer (or every order when `retailer_id`
    /// is `None`), with per-status counts and the full composite detail of
    /// every `New` order.
    ///
    /// The detail views are re-fetched one order at a time; retailers with
    /// many unactioned orders pay a read per order here.
    pub async fn orders_for_retailer(
        &self,
        retailer_id: Option<i64>,
    ) -> Result<RetailerOrderSummary, OrderManagerError> {
        let mut query = OrderQueryFilter::default();
        if let Some(retailer_id) = retailer_id {
            query = query.with_retailer_id(retailer_id);
        }
        let orders = self
            .db
            .fetch_orders(query)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?;
        let mut new_orders = Vec::new();
        for order in orders.iter().filter(|o| o.status == OrderStatusType::New) {
            new_orders.push(self.order_details(order.order_id).await?);
        }
        trace!("🔄️📦️ {} of {} retailer orders are New", new_orders.len(), orders.len());
        Ok(RetailerOrderSummary::from_orders(orders, new_orders))
    }

    /// Applies a partial update to an order. Fields that are absent from
    /// `update` are left untouched. An update with no fields present is a
    /// no-op that reports success.
    pub async fn update_order(&self, order_id: i64, update: OrderUpdate) -> Result<(), OrderManagerError> {
        if update.is_empty() {
            debug!("🔄️📦️ No fields to update for order {order_id}. Update request skipped.");
            return Ok(());
        }
        let rows = self
            .db
            .update_order(order_id, update)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?;
        if rows == 0 {
            return Err(OrderManagerError::OrderNotFound(order_id));
        }
        Ok(())
    }

    /// Changes the status of an order.
    ///
    /// The current status is read first and the transition is checked against
    /// [`OrderStatusType::can_transition`]: the terminal states `Delivered`
    /// and `Cancelled` cannot be left, every other move is allowed. Returns
    /// the old status.
    pub async fn update_order_status(
        &self,
        order_id: i64,
        new_status: OrderStatusType,
    ) -> Result<OrderStatusType, OrderManagerError> {
        let order = self
            .db
            .fetch_order_by_id(order_id)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?
            .ok_or(OrderManagerError::OrderNotFound(order_id))?;
        let old_status = order.status;
        if !old_status.can_transition(new_status) {
            warn!("🔄️📦️ Rejected status change for order {order_id}: {old_status} -> {new_status}");
            return Err(OrderManagerError::InvalidStatusTransition {
                order_id,
                from: old_status,
                to: new_status,
            });
        }
        self.db
            .update_order_status(order_id, new_status)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?;
        debug!("🔄️📦️ Order {order_id} status changed: {old_status} -> {new_status}");
        Ok(old_status)
    }

    /// Deletes an order and all of its line items.
    pub async fn delete_order(&self, order_id: i64) -> Result<(), OrderManagerError> {
        let rows = self
            .db
            .delete_order(order_id)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))?;
        if rows == 0 {
            return Err(OrderManagerError::OrderNotFound(order_id));
        }
        Ok(())
    }

    /// Fetches the bare order row, without items or customer.
    pub async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, OrderManagerError> {
        self.db
            .fetch_order_by_id(order_id)
            .await
            .map_err(|e| OrderManagerError::DatabaseError(e.to_string()))
    }
}
