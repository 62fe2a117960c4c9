use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "OrderId")]
    pub order_id: i64,
}

impl OrderCreatedResponse {
    pub fn new(order_id: i64) -> Self {
        Self { success: true, message: "Order created successfully".to_string(), order_id }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemCreatedResponse {
    pub success: bool,
    #[serde(rename = "OrderItemId")]
    pub order_item_id: i64,
}

impl OrderItemCreatedResponse {
    pub fn new(order_item_id: i64) -> Self {
        Self { success: true, order_item_id }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreatedResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "CustomerId")]
    pub customer_id: i64,
}

impl CustomerCreatedResponse {
    pub fn new(customer_id: i64) -> Self {
        Self { success: true, message: "Customer registered".to_string(), customer_id }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerCreatedResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "RetailerId")]
    pub retailer_id: i64,
}

impl RetailerCreatedResponse {
    pub fn new(retailer_id: i64) -> Self {
        Self { success: true, message: "Retailer created".to_string(), retailer_id }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineCreatedResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "MedicineId")]
    pub medicine_id: i64,
}

impl MedicineCreatedResponse {
    pub fn new(medicine_id: i64) -> Self {
        Self { success: true, message: "Medicine created".to_string(), medicine_id }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionCreatedResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "PrescriptionId")]
    pub prescription_id: i64,
}

impl PrescriptionCreatedResponse {
    pub fn new(prescription_id: i64) -> Self {
        Self { success: true, message: "Prescription uploaded".to_string(), prescription_id }
    }
}

/// `PATCH /orders/{order_id}/status?status=...`
#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

/// `PATCH /prescriptions/{prescription_id}/verify?verified_by=...`
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyQuery {
    pub verified_by: String,
}

/// `GET /medicines?category_id=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicineQuery {
    pub category_id: Option<i64>,
}
