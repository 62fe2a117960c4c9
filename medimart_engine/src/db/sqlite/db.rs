use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::{customers, db_url, medicines, new_pool, order_items, orders, prescriptions, retailers};
use crate::{
    db::sqlite::SqliteDatabaseError,
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
    traits::{
        CustomerManagement,
        MedicineManagement,
        OrderItemManagement,
        OrderManagement,
        PrescriptionManagement,
        RetailerManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL from the environment.
    pub async fn new(max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Safe to call on every startup.
    pub async fn run_migrations(&self) -> Result<(), SqliteDatabaseError> {
        sqlx::migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }
}

impl OrderManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_order(&self, order: NewOrder) -> Result<i64, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let order_id = orders::insert_order(&order, &mut tx).await?;
        debug!("🗃️ Order row saved in the DB with id {order_id}");
        let mut total_amount = 0.0;
        for item in &order.items {
            total_amount += item.line_total();
            order_items::insert_item(order_id, item, &mut tx).await?;
        }
        orders::update_order_total(order_id, total_amount, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order {order_id} created with {} items, total {total_amount}", order.items.len());
        Ok(order_id)
    }

    async fn fetch_order_by_id(&self, order_id: i64) -> Result<Option<Order>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_by_id(order_id, &mut conn).await
    }

    async fn fetch_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_orders(&query, &mut conn).await
    }

    async fn update_order(&self, order_id: i64, update: OrderUpdate) -> Result<u64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        trace!("🗃️ Order {order_id} updating with new values: {update:?}");
        orders::update_order(order_id, &update, &mut conn).await
    }

    async fn update_order_status(&self, order_id: i64, status: OrderStatusType) -> Result<u64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        orders::update_order_status(order_id, status, &mut conn).await
    }

    async fn delete_order(&self, order_id: i64) -> Result<u64, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let items_removed = order_items::delete_items_for_order(order_id, &mut tx).await?;
        let rows = orders::delete_order_row(order_id, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order {order_id} deleted along with {items_removed} items");
        Ok(rows)
    }
}

impl OrderItemManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_order_item(&self, order_id: i64, item: NewOrderItem) -> Result<i64, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let item_id = order_items::insert_item(order_id, &item, &mut tx).await?;
        let total = order_items::recompute_order_total(order_id, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Item {item_id} added to order {order_id}. New total: {total}");
        Ok(item_id)
    }

    async fn fetch_order_item(&self, item_id: i64) -> Result<Option<OrderItem>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        order_items::fetch_item_by_id(item_id, &mut conn).await
    }

    async fn fetch_items_for_order(&self, order_id: i64) -> Result<Vec<OrderItem>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        order_items::fetch_items_for_order(order_id, &mut conn).await
    }

    async fn update_order_item(&self, item_id: i64, update: OrderItemUpdate) -> Result<u64, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = order_items::update_item(item_id, &update, &mut tx).await?;
        if rows > 0 {
            // The item is re-read after the patch to learn its parent order.
            if let Some(item) = order_items::fetch_item_by_id(item_id, &mut tx).await? {
                let total = order_items::recompute_order_total(item.order_id, &mut tx).await?;
                debug!("🗃️ Item {item_id} updated. Order {} total is now {total}", item.order_id);
            }
        }
        tx.commit().await?;
        Ok(rows)
    }

    async fn delete_order_item(&self, item_id: i64) -> Result<Option<i64>, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let Some(item) = order_items::fetch_item_by_id(item_id, &mut tx).await? else {
            return Ok(None);
        };
        order_items::delete_item(item_id, &mut tx).await?;
        let total = order_items::recompute_order_total(item.order_id, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Item {item_id} deleted. Order {} total is now {total}", item.order_id);
        Ok(Some(item.order_id))
    }
}

impl CustomerManagement for SqliteDatabase {
    async fn insert_customer(
        &self,
        customer: NewCustomer,
        password_hash: String,
    ) -> Result<i64, CustomerApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CustomerApiError::DatabaseError(e.to_string()))?;
        match customers::insert_customer(&customer, &password_hash, &mut conn).await {
            Ok(id) => Ok(id),
            Err(SqliteDatabaseError::DuplicateEmail(email)) => Err(CustomerApiError::EmailInUse(email)),
            Err(e) => Err(CustomerApiError::DatabaseError(e.to_string())),
        }
    }

    async fn fetch_customer_by_id(&self, customer_id: i64) -> Result<Option<Customer>, CustomerApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CustomerApiError::DatabaseError(e.to_string()))?;
        customers::fetch_customer_by_id(customer_id, &mut conn)
            .await
            .map_err(|e| CustomerApiError::DatabaseError(e.to_string()))
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, CustomerApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CustomerApiError::DatabaseError(e.to_string()))?;
        customers::fetch_customers(&mut conn).await.map_err(|e| CustomerApiError::DatabaseError(e.to_string()))
    }

    async fn update_customer(
        &self,
        customer_id: i64,
        update: CustomerUpdate,
    ) -> Result<u64, CustomerApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CustomerApiError::DatabaseError(e.to_string()))?;
        customers::update_customer(customer_id, &update, &mut conn)
            .await
            .map_err(|e| CustomerApiError::DatabaseError(e.to_string()))
    }

    async fn delete_customer(&self, customer_id: i64) -> Result<u64, CustomerApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CustomerApiError::DatabaseError(e.to_string()))?;
        customers::delete_customer(customer_id, &mut conn)
            .await
            .map_err(|e| CustomerApiError::DatabaseError(e.to_string()))
    }
}

impl RetailerManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_retailer(&self, retailer: NewRetailer) -> Result<i64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        retailers::insert_retailer(&retailer, &mut conn).await
    }

    async fn fetch_retailer_by_id(&self, retailer_id: i64) -> Result<Option<Retailer>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        retailers::fetch_retailer_by_id(retailer_id, &mut conn).await
    }

    async fn fetch_retailers(&self) -> Result<Vec<Retailer>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        retailers::fetch_retailers(&mut conn).await
    }

    async fn update_retailer(&self, retailer_id: i64, update: RetailerUpdate) -> Result<u64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        retailers::update_retailer(retailer_id, &update, &mut conn).await
    }

    async fn delete_retailer(&self, retailer_id: i64) -> Result<u64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        retailers::delete_retailer(retailer_id, &mut conn).await
    }
}

impl MedicineManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_medicine(&self, medicine: NewMedicine) -> Result<i64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        medicines::insert_medicine(&medicine, &mut conn).await
    }

    async fn fetch_medicine_by_id(&self, medicine_id: i64) -> Result<Option<Medicine>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        medicines::fetch_medicine_by_id(medicine_id, &mut conn).await
    }

    async fn fetch_medicines(&self, category_id: Option<i64>) -> Result<Vec<Medicine>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        medicines::fetch_medicines(category_id, &mut conn).await
    }

    async fn update_medicine(&self, medicine_id: i64, update: MedicineUpdate) -> Result<u64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        medicines::update_medicine(medicine_id, &update, &mut conn).await
    }

    async fn delete_medicine(&self, medicine_id: i64) -> Result<u64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        medicines::delete_medicine(medicine_id, &mut conn).await
    }
}

impl PrescriptionManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_prescription(&self, prescription: NewPrescription) -> Result<i64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        prescriptions::insert_prescription(&prescription, &mut conn).await
    }

    async fn fetch_prescription_by_id(
        &self,
        prescription_id: i64,
    ) -> Result<Option<Prescription>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        prescriptions::fetch_prescription_by_id(prescription_id, &mut conn).await
    }

    async fn fetch_prescriptions_for_order(&self, order_id: i64) -> Result<Vec<Prescription>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        prescriptions::fetch_prescriptions_for_order(order_id, &mut conn).await
    }

    async fn verify_prescription(&self, prescription_id: i64, verified_by: String) -> Result<u64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        prescriptions::mark_verified(prescription_id, &verified_by, &mut conn).await
    }

    async fn delete_prescription(&self, prescription_id: i64) -> Result<u64, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        prescriptions::delete_prescription(prescription_id, &mut conn).await
    }
}
