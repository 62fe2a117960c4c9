use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------   OrderStatusType     -------------------------------------------------------
/// The set of states an order can be in.
///
/// The status column is a closed enumeration. Writes go through
/// [`OrderStatusType::can_transition`], which allows every transition except
/// those leaving the terminal states (`Delivered`, `Cancelled`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// The order has been placed and the retailer has not yet acted on it.
    #[default]
    New,
    /// The order is awaiting payment, prescription verification, or stock.
    Pending,
    /// The retailer has accepted the order and is preparing it.
    Accepted,
    /// The order has been handed to a delivery partner.
    InTransit,
    /// The order has been delivered. Terminal.
    Delivered,
    /// The order has been cancelled by the customer or the retailer. Terminal.
    Cancelled,
}

impl OrderStatusType {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatusType::Delivered | OrderStatusType::Cancelled)
    }

    /// Whether an order in this status may be moved to `next`. Terminal states
    /// are frozen; everything else is permitted, including re-writing the
    /// same status.
    pub fn can_transition(&self, next: OrderStatusType) -> bool {
        if self == &next {
            return true;
        }
        !self.is_terminal()
    }
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::New => write!(f, "New"),
            OrderStatusType::Pending => write!(f, "Pending"),
            OrderStatusType::Accepted => write!(f, "Accepted"),
            OrderStatusType::InTransit => write!(f, "InTransit"),
            OrderStatusType::Delivered => write!(f, "Delivered"),
            OrderStatusType::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Pending" => Ok(Self::Pending),
            "Accepted" => Ok(Self::Accepted),
            "InTransit" => Ok(Self::InTransit),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

//--------------------------------------        Order        ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    pub order_id: i64,
    pub customer_id: i64,
    pub retailer_id: i64,
    pub retailer_name: Option<String>,
    pub order_date_time: DateTime<Utc>,
    pub expected_delivery: Option<DateTime<Utc>>,
    pub delivery_mode: Option<String>,
    pub delivery_service: Option<String>,
    pub delivery_partner_tracking_id: Option<String>,
    pub delivery_status: String,
    pub payment_mode: Option<String>,
    pub payment_status: String,
    pub prescription_file_url: Option<String>,
    pub prescription_verified: bool,
    pub total_amount: f64,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       NewOrder       --------------------------------------------------------
/// An order submission. `Items` may be empty; the stored total is always the
/// sum of the line totals written alongside the order row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewOrder {
    pub customer_id: i64,
    pub retailer_id: i64,
    #[serde(default)]
    pub retailer_name: Option<String>,
    #[serde(default)]
    pub order_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expected_delivery: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivery_mode: Option<String>,
    #[serde(default)]
    pub delivery_service: Option<String>,
    #[serde(default)]
    pub delivery_partner_tracking_id: Option<String>,
    #[serde(default)]
    pub delivery_status: Option<String>,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub prescription_file_url: Option<String>,
    #[serde(default)]
    pub prescription_verified: bool,
    #[serde(default)]
    pub status: OrderStatusType,
    #[serde(default)]
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    pub fn new(customer_id: i64, retailer_id: i64) -> Self {
        Self {
            customer_id,
            retailer_id,
            retailer_name: None,
            order_date_time: None,
            expected_delivery: None,
            delivery_mode: None,
            delivery_service: None,
            delivery_partner_tracking_id: None,
            delivery_status: None,
            payment_mode: None,
            payment_status: None,
            prescription_file_url: None,
            prescription_verified: false,
            status: OrderStatusType::New,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: NewOrderItem) -> Self {
        self.items.push(item);
        self
    }
}

//--------------------------------------      OrderUpdate     --------------------------------------------------------
/// A partial order update. Only fields that are present are written; see
/// [`crate::db::sqlite::orders::update_order`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderUpdate {
    pub retailer_name: Option<String>,
    pub expected_delivery: Option<DateTime<Utc>>,
    pub delivery_mode: Option<String>,
    pub delivery_service: Option<String>,
    pub delivery_partner_tracking_id: Option<String>,
    pub delivery_status: Option<String>,
    pub payment_mode: Option<String>,
    pub payment_status: Option<String>,
    pub prescription_file_url: Option<String>,
    pub prescription_verified: Option<bool>,
    pub status: Option<OrderStatusType>,
}

impl OrderUpdate {
    pub fn is_empty(&self) -> bool {
        self.retailer_name.is_none()
            && self.expected_delivery.is_none()
            && self.delivery_mode.is_none()
            && self.delivery_service.is_none()
            && self.delivery_partner_tracking_id.is_none()
            && self.delivery_status.is_none()
            && self.payment_mode.is_none()
            && self.payment_status.is_none()
            && self.prescription_file_url.is_none()
            && self.prescription_verified.is_none()
            && self.status.is_none()
    }
}

//--------------------------------------      OrderItem       --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct OrderItem {
    pub order_item_id: i64,
    pub order_id: i64,
    pub medicine_id: i64,
    pub medicine_name: Option<String>,
    pub quantity: i64,
    pub price: f64,
    pub total_amount: f64,
}

//--------------------------------------     NewOrderItem     --------------------------------------------------------
/// A line item submission. `OrderId` is ignored for items nested inside a
/// [`NewOrder`], and required for standalone item creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewOrderItem {
    #[serde(default)]
    pub order_id: Option<i64>,
    pub medicine_id: i64,
    #[serde(default)]
    pub medicine_name: Option<String>,
    pub quantity: i64,
    pub price: f64,
}

impl NewOrderItem {
    pub fn new(medicine_id: i64, price: f64, quantity: i64) -> Self {
        Self { order_id: None, medicine_id, medicine_name: None, quantity, price }
    }

    pub fn for_order(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// The line total that gets persisted with the item.
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

//--------------------------------------   OrderItemUpdate    --------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderItemUpdate {
    pub medicine_id: Option<i64>,
    pub medicine_name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

impl OrderItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.medicine_id.is_none()
            && self.medicine_name.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
    }
}

//--------------------------------------      Customer        --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    pub customer_id: i64,
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub email: String,
    // The hash never goes out on the wire.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    #[serde(rename = "IFSCCode")]
    pub ifsc_code: Option<String>,
    pub branch: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewCustomer {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    pub email: String,
    /// The plaintext password supplied at registration. Hashed before it
    /// reaches the database.
    pub password: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default, rename = "IFSCCode")]
    pub ifsc_code: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerUpdate {
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    #[serde(rename = "IFSCCode")]
    pub ifsc_code: Option<String>,
    pub branch: Option<String>,
}

impl CustomerUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.profile_picture.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.phone_number.is_none()
            && self.address_line1.is_none()
            && self.address_line2.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.country.is_none()
            && self.postal_code.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.bank_name.is_none()
            && self.account_number.is_none()
            && self.ifsc_code.is_none()
            && self.branch.is_none()
    }
}

//--------------------------------------      Retailer        --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Retailer {
    pub retailer_id: i64,
    pub shop_name: String,
    pub owner_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewRetailer {
    pub shop_name: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RetailerUpdate {
    pub shop_name: Option<String>,
    pub owner_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl RetailerUpdate {
    pub fn is_empty(&self) -> bool {
        self.shop_name.is_none()
            && self.owner_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.address_line1.is_none()
            && self.address_line2.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.country.is_none()
            && self.postal_code.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }
}

//--------------------------------------      Medicine        --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Medicine {
    pub medicine_id: i64,
    pub medicine_category_id: Option<i64>,
    pub name: String,
    pub generic_name: Option<String>,
    pub dosage_form: Option<String>,
    pub strength: Option<String>,
    pub manufacturer: Option<String>,
    pub prescription_required: bool,
    pub size: Option<i64>,
    pub unit_price: f64,
    pub therapeutic_class: Option<String>,
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewMedicine {
    #[serde(default)]
    pub medicine_category_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub generic_name: Option<String>,
    #[serde(default)]
    pub dosage_form: Option<String>,
    #[serde(default)]
    pub strength: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub prescription_required: bool,
    #[serde(default)]
    pub size: Option<i64>,
    pub unit_price: f64,
    #[serde(default)]
    pub therapeutic_class: Option<String>,
    #[serde(default)]
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicineUpdate {
    pub medicine_category_id: Option<i64>,
    pub name: Option<String>,
    pub generic_name: Option<String>,
    pub dosage_form: Option<String>,
    pub strength: Option<String>,
    pub manufacturer: Option<String>,
    pub prescription_required: Option<bool>,
    pub size: Option<i64>,
    pub unit_price: Option<f64>,
    pub therapeutic_class: Option<String>,
    pub img_url: Option<String>,
}

impl MedicineUpdate {
    pub fn is_empty(&self) -> bool {
        self.medicine_category_id.is_none()
            && self.name.is_none()
            && self.generic_name.is_none()
            && self.dosage_form.is_none()
            && self.strength.is_none()
            && self.manufacturer.is_none()
            && self.prescription_required.is_none()
            && self.size.is_none()
            && self.unit_price.is_none()
            && self.therapeutic_class.is_none()
            && self.img_url.is_none()
    }
}

//--------------------------------------    Prescription      --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct Prescription {
    pub prescription_id: i64,
    pub customer_id: i64,
    pub order_id: i64,
    pub doctor_name: Option<String>,
    pub document_url: String,
    pub status: String,
    pub verified: bool,
    pub verified_by: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewPrescription {
    pub customer_id: i64,
    pub order_id: i64,
    #[serde(default)]
    pub doctor_name: Option<String>,
    pub document_url: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for s in ["New", "Pending", "Accepted", "InTransit", "Delivered", "Cancelled"] {
            let status = s.parse::<OrderStatusType>().unwrap();
            assert_eq!(status.to_string(), s);
        }
        assert!("Shipped".parse::<OrderStatusType>().is_err());
    }

    #[test]
    fn terminal_states_are_frozen() {
        use OrderStatusType::*;
        assert!(New.can_transition(Delivered));
        assert!(Pending.can_transition(Cancelled));
        assert!(InTransit.can_transition(New));
        assert!(!Delivered.can_transition(New));
        assert!(!Cancelled.can_transition(Pending));
        // Re-writing the current status is a no-op, not an error
        assert!(Delivered.can_transition(Delivered));
    }

    #[test]
    fn line_total_is_price_times_quantity() {
        let item = NewOrderItem::new(5, 10.0, 3);
        assert_eq!(item.line_total(), 30.0);
    }
}
