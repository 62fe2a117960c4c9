//! MediMart Engine
//!
//! The MediMart engine is the backend for a medical marketplace that connects
//! customers with medicine retailers. This library contains the core logic
//! for the marketplace. It is transport-agnostic.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@db`]). Currently, Sqlite is the supported backend. You should never
//!    need to access the database directly. Instead, use the public API provided by the engine. The exception is
//!    the data types used in the database. These are defined in the `db_types` module and are public.
//! 2. The engine public API ([`mod@market_api`]). This provides the public-facing functionality of the
//!    marketplace: order lifecycle management, line-item management, and the CRUD surfaces for customers,
//!    retailers, the medicine catalogue and prescriptions. Specific backends (e.g. SQLite) implement the traits
//!    in [`mod@traits`] in order to act as a backend for the MediMart server.
//!
//! The one piece of multi-step logic in the engine is the order-total invariant: an order's stored total is the
//! sum of its line items' totals, re-derived from a full re-read after every item mutation. Backends run each of
//! those flows atomically.

mod db;

pub mod db_types;
pub mod helpers;
mod market_api;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::SqliteDatabase;
#[cfg(feature = "sqlite")]
pub use db::sqlite::SqliteDatabaseError;
pub use market_api::{
    catalog_api::CatalogApi,
    customer_api::CustomerApi,
    errors::{
        CatalogApiError,
        CustomerApiError,
        OrderManagerError,
        PrescriptionApiError,
        RetailerApiError,
    },
    order_flow_api::OrderFlowApi,
    order_item_api::OrderItemApi,
    order_objects,
    prescription_api::PrescriptionApi,
    retailer_api::RetailerApi,
};
