use serde::{Deserialize, Serialize};

use crate::db_types::{Customer, Order, OrderItem, OrderStatusType};

//--------------------------------------  OrderQueryFilter  ----------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderQueryFilter {
    pub customer_id: Option<i64>,
    pub retailer_id: Option<i64>,
    pub status: Option<Vec<OrderStatusType>>,
}

impl OrderQueryFilter {
    pub fn with_customer_id(mut self, customer_id: i64) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn with_retailer_id(mut self, retailer_id: i64) -> Self {
        self.retailer_id = Some(retailer_id);
        self
    }

    pub fn with_status(mut self, status: OrderStatusType) -> Self {
        self.status.get_or_insert_with(Vec::new).push(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.customer_id.is_none()
            && self.retailer_id.is_none()
            && self.status.as_ref().map_or(true, |s| s.is_empty())
    }
}

//--------------------------------------    OrderDetails    ----------------------------------------------------------
/// The composite view returned for a single order: the order row, the owning
/// customer's profile and the full set of line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    #[serde(rename = "Customer")]
    pub customer: Option<Customer>,
    #[serde(rename = "Items")]
    pub items: Vec<OrderItem>,
}

//-------------------------------------- CustomerOrderSummary --------------------------------------------------------
/// Orders for one customer (or all customers) with derived status counts.
///
/// `Placed` groups `New` and `Pending`. Orders in any other status are part
/// of `TotalOrders` and `Data` but belong to no bucket, so the three buckets
/// sum to at most `TotalOrders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerOrderSummary {
    pub total_orders: usize,
    pub delivered: usize,
    pub in_transit: usize,
    pub placed: usize,
    pub data: Vec<Order>,
}

impl CustomerOrderSummary {
    pub fn from_orders(orders: Vec<Order>) -> Self {
        use OrderStatusType::*;
        let delivered = orders.iter().filter(|o| o.status == Delivered).count();
        let in_transit = orders.iter().filter(|o| o.status == InTransit).count();
        let placed = orders.iter().filter(|o| matches!(o.status, New | Pending)).count();
        Self { total_orders: orders.len(), delivered, in_transit, placed, data: orders }
    }
}

//-------------------------------------- RetailerOrderSummary --------------------------------------------------------
/// Orders for one retailer (or all retailers) with per-status counts and the
/// full detail of every `New` order.
///
/// `Accepted` is derived as "not New and not Cancelled", so it overlaps the
/// `Pending`, `InTransit` and `Delivered` counts. The six counts are
/// independent aggregates and do not sum to `TotalOrders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RetailerOrderSummary {
    pub total_orders: usize,
    pub new: usize,
    pub accepted: usize,
    pub pending: usize,
    pub in_transit: usize,
    pub delivered: usize,
    pub cancelled: usize,
    pub new_orders: Vec<OrderDetails>,
    pub all_orders: Vec<Order>,
}

impl RetailerOrderSummary {
    pub fn from_orders(orders: Vec<Order>, new_orders: Vec<OrderDetails>) -> Self {
        use OrderStatusType::*;
        let count = |s: OrderStatusType| orders.iter().filter(|o| o.status == s).count();
        let accepted = orders.iter().filter(|o| !matches!(o.status, New | Cancelled)).count();
        Self {
            total_orders: orders.len(),
            new: count(New),
            accepted,
            pending: count(Pending),
            in_transit: count(InTransit),
            delivered: count(Delivered),
            cancelled: count(Cancelled),
            new_orders,
            all_orders: orders,
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::*;

    fn order(status: OrderStatusType) -> Order {
        Order {
            order_id: 1,
            customer_id: 1,
            retailer_id: 2,
            retailer_name: None,
            order_date_time: Utc::now(),
            expected_delivery: None,
            delivery_mode: None,
            delivery_service: None,
            delivery_partner_tracking_id: None,
            delivery_status: "Pending".to_string(),
            payment_mode: None,
            payment_status: "Pending".to_string(),
            prescription_file_url: None,
            prescription_verified: false,
            total_amount: 0.0,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn customer_summary_buckets_do_not_exceed_total() {
        use OrderStatusType::*;
        let orders = vec![order(New), order(Pending), order(Accepted), order(Delivered), order(Cancelled)];
        let summary = CustomerOrderSummary::from_orders(orders);
        assert_eq!(summary.total_orders, 5);
        assert_eq!(summary.placed, 2);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.in_transit, 0);
        // Accepted and Cancelled orders fall outside every bucket
        assert!(summary.delivered + summary.in_transit + summary.placed <= summary.total_orders);
    }

    #[test]
    fn retailer_accepted_count_overlaps_other_buckets() {
        use OrderStatusType::*;
        let orders = vec![order(New), order(Pending), order(InTransit), order(Delivered), order(Cancelled)];
        let summary = RetailerOrderSummary::from_orders(orders, vec![]);
        assert_eq!(summary.total_orders, 5);
        assert_eq!(summary.new, 1);
        assert_eq!(summary.cancelled, 1);
        // Pending, InTransit and Delivered are all "not New and not Cancelled"
        assert_eq!(summary.accepted, 3);
        let bucket_sum = summary.new
            + summary.accepted
            + summary.pending
            + summary.in_transit
            + summary.delivered
            + summary.cancelled;
        assert!(bucket_sum > summary.total_orders);
    }

    #[test]
    fn summary_serializes_with_wire_field_names() {
        let summary = CustomerOrderSummary::from_orders(vec![]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["TotalOrders"], 0);
        assert!(json.get("InTransit").is_some());
        assert!(json.get("Placed").is_some());
        assert!(json.get("Data").is_some());
    }
}
