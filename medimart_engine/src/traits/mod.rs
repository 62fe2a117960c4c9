//! Backend traits for the marketplace engine.
//!
//! Specific storage backends (currently SQLite) implement these traits to act
//! as a backend for the MediMart server. The traits carry the multi-step
//! write flows (order creation with nested items, and the total recomputes
//! triggered by item mutations) so that implementations can make each flow
//! atomic in whatever way the underlying store supports.

use crate::{
    db_types::{
        Customer,
        CustomerUpdate,
        Medicine,
        MedicineUpdate,
        NewCustomer,
        NewMedicine,
        NewOrder,
        NewOrderItem,
        NewPrescription,
        NewRetailer,
        Order,
        OrderItem,
        OrderItemUpdate,
        OrderStatusType,
        OrderUpdate,
        Prescription,
        Retailer,
        RetailerUpdate,
    },
    market_api::errors::CustomerApiError,
    order_objects::OrderQueryFilter,
};

#[allow(async_fn_in_trait)]
pub trait OrderManagement: Clone {
    type Error: std::error::Error;

    /// Takes a new order and, in a single atomic flow,
    /// * inserts the order row,
    /// * inserts each nested line item with its computed line total,
    /// * writes the accumulated sum back to the order row.
    ///
    /// Returns the new order id.
    async fn insert_order(&self, order: NewOrder) -> Result<i64, Self::Error>;

    async fn fetch_order_by_id(&self, order_id: i64) -> Result<Option<Order>, Self::Error>;

    async fn fetch_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, Self::Error>;

    /// Applies only the fields present in `update`. Returns the number of
    /// rows that matched (0 when the order does not exist).
    async fn update_order(&self, order_id: i64, update: OrderUpdate) -> Result<u64, Self::Error>;

    /// Overwrites the status column. Transition legality is checked at the
    /// API level; see [`crate::OrderFlowApi::update_order_status`].
    async fn update_order_status(&self, order_id: i64, status: OrderStatusType) -> Result<u64, Self::Error>;

    /// Deletes the order's items and then the order row, atomically. Returns
    /// the number of order rows removed.
    async fn delete_order(&self, order_id: i64) -> Result<u64, Self::Error>;
}

#[allow(async_fn_in_trait)]
pub trait OrderItemManagement {
    type Error: std::error::Error;

    /// Inserts a line item and recomputes the parent order's stored total in
    /// the same atomic flow. Returns the new item id.
    async fn insert_order_item(&self, order_id: i64, item: NewOrderItem) -> Result<i64, Self::Error>;

    async fn fetch_order_item(&self, item_id: i64) -> Result<Option<OrderItem>, Self::Error>;

    async fn fetch_items_for_order(&self, order_id: i64) -> Result<Vec<OrderItem>, Self::Error>;

    /// Patches the provided fields, refreshes the stored line total and
    /// recomputes the parent order's total. Returns the number of item rows
    /// that matched.
    async fn update_order_item(&self, item_id: i64, update: OrderItemUpdate) -> Result<u64, Self::Error>;

    /// Deletes the item and recomputes the parent order's total from the
    /// remaining items. Returns the parent order id, or `None` if the item
    /// did not exist.
    async fn delete_order_item(&self, item_id: i64) -> Result<Option<i64>, Self::Error>;
}

/// Unlike the other seams, this trait reports [`CustomerApiError`] directly
/// so that a duplicate email surfaces as a typed variant rather than an
/// opaque backend string.
#[allow(async_fn_in_trait)]
pub trait CustomerManagement {
    async fn insert_customer(
        &self,
        customer: NewCustomer,
        password_hash: String,
    ) -> Result<i64, CustomerApiError>;
    async fn fetch_customer_by_id(&self, customer_id: i64) -> Result<Option<Customer>, CustomerApiError>;
    async fn fetch_customers(&self) -> Result<Vec<Customer>, CustomerApiError>;
    async fn update_customer(&self, customer_id: i64, update: CustomerUpdate)
        -> Result<u64, CustomerApiError>;
    async fn delete_customer(&self, customer_id: i64) -> Result<u64, CustomerApiError>;
}

#[allow(async_fn_in_trait)]
pub trait RetailerManagement {
    type Error: std::error::Error;

    async fn insert_retailer(&self, retailer: NewRetailer) -> Result<i64, Self::Error>;
    async fn fetch_retailer_by_id(&self, retailer_id: i64) -> Result<Option<Retailer>, Self::Error>;
    async fn fetch_retailers(&self) -> Result<Vec<Retailer>, Self::Error>;
    async fn update_retailer(&self, retailer_id: i64, update: RetailerUpdate) -> Result<u64, Self::Error>;
    async fn delete_retailer(&self, retailer_id: i64) -> Result<u64, Self::Error>;
}

#[allow(async_fn_in_trait)]
pub trait MedicineManagement {
    type Error: std::error::Error;

    async fn insert_medicine(&self, medicine: NewMedicine) -> Result<i64, Self::Error>;
    async fn fetch_medicine_by_id(&self, medicine_id: i64) -> Result<Option<Medicine>, Self::Error>;
    async fn fetch_medicines(&self, category_id: Option<i64>) -> Result<Vec<Medicine>, Self::Error>;
    async fn update_medicine(&self, medicine_id: i64, update: MedicineUpdate) -> Result<u64, Self::Error>;
    async fn delete_medicine(&self, medicine_id: i64) -> Result<u64, Self::Error>;
}

#[allow(async_fn_in_trait)]
pub trait PrescriptionManagement {
    type Error: std::error::Error;

    async fn insert_prescription(&self, prescription: NewPrescription) -> Result<i64, Self::Error>;
    async fn fetch_prescription_by_id(
        &self,
        prescription_id: i64,
    ) -> Result<Option<Prescription>, Self::Error>;
    async fn fetch_prescriptions_for_order(&self, order_id: i64) -> Result<Vec<Prescription>, Self::Error>;
    /// Marks the prescription verified and records the verifier. Returns the
    /// number of rows that matched.
    async fn verify_prescription(&self, prescription_id: i64, verified_by: String) -> Result<u64, Self::Error>;
    async fn delete_prescription(&self, prescription_id: i64) -> Result<u64, Self::Error>;
}
