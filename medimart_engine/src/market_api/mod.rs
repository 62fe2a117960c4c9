//! # MediMart engine public API
//!
//! The `market_api` module exposes the programmatic API for the marketplace
//! engine. The API is modular, so that clients can pick and choose the
//! functionality they need. The order flows could be served from one process
//! and the catalogue from another, for example.
//!
//! * [`order_flow_api`] handles the order lifecycle: creation with nested
//!   line items, composite detail views, the per-customer and per-retailer
//!   status summaries, updates, status changes and cascading deletes.
//! * [`order_item_api`] manages individual line items and keeps the parent
//!   order's stored total in step with every mutation.
//! * [`customer_api`], [`retailer_api`], [`catalog_api`] and
//!   [`prescription_api`] provide the CRUD surfaces for the remaining
//!   marketplace entities.
//!
//! # API usage
//!
//! The pattern for using all the APIs is the same. An API instance is created
//! by supplying a database backend that implements the traits the API
//! requires:
//!
//! ```rust,ignore
//! use medimart_engine::{OrderFlowApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/medimart.db", 25).await?;
//! // SqliteDatabase implements OrderManagement + OrderItemManagement + CustomerManagement
//! let api = OrderFlowApi::new(db);
//! let details = api.order_details(42).await?;
//! ```

pub mod catalog_api;
pub mod customer_api;
pub mod errors;
pub mod order_flow_api;
pub mod order_item_api;
pub mod order_objects;
pub mod prescription_api;
pub mod retailer_api;
