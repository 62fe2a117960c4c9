use thiserror::Error;

use crate::db_types::OrderStatusType;

#[derive(Debug, Clone, Error)]
pub enum OrderManagerError {
    // Display strings double as the user-facing messages, so they stay terse.
    #[error("Order not found")]
    OrderNotFound(i64),
    #[error("Order item not found")]
    ItemNotFound(i64),
    #[error("Order item create requests must include an OrderId")]
    MissingOrderId,
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidStatusTransition { order_id: i64, from: OrderStatusType, to: OrderStatusType },
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Error)]
pub enum CustomerApiError {
    #[error("Customer not found")]
    CustomerNotFound(i64),
    #[error("A customer with email {0} already exists")]
    EmailInUse(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Error)]
pub enum RetailerApiError {
    #[error("Retailer not found")]
    RetailerNotFound(i64),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Medicine not found")]
    MedicineNotFound(i64),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Error)]
pub enum PrescriptionApiError {
    #[error("Prescription not found")]
    PrescriptionNotFound(i64),
    #[error("Database error: {0}")]
    DatabaseError(String),
}
