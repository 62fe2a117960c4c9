use chrono::Utc;
use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewOrder, Order, OrderStatusType, OrderUpdate},
    order_objects::OrderQueryFilter,
};

const ORDER_COLUMNS: &str = "order_id, customer_id, retailer_id, retailer_name, order_date_time, \
     expected_delivery, delivery_mode, delivery_service, delivery_partner_tracking_id, delivery_status, \
     payment_mode, payment_status, prescription_file_url, prescription_verified, total_amount, status, \
     created_at, updated_at";

/// Inserts the order row only. Line items and the stored total are written by
/// the caller; embed this call in a transaction and pass `&mut *tx` as the
/// connection argument to keep the whole flow atomic.
pub async fn insert_order(order: &NewOrder, conn: &mut SqliteConnection) -> Result<i64, SqliteDatabaseError> {
    let order_date_time = order.order_date_time.unwrap_or_else(Utc::now);
    let delivery_status = order.delivery_status.clone().unwrap_or_else(|| "Pending".to_string());
    let payment_status = order.payment_status.clone().unwrap_or_else(|| "Pending".to_string());
    let order_id: i64 = sqlx::query_scalar(
        r#"
            INSERT INTO orders (
                customer_id,
                retailer_id,
                retailer_name,
                order_date_time,
                expected_delivery,
                delivery_mode,
                delivery_service,
                delivery_partner_tracking_id,
                delivery_status,
                payment_mode,
                payment_status,
                prescription_file_url,
                prescription_verified,
                status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING order_id;
        "#,
    )
    .bind(order.customer_id)
    .bind(order.retailer_id)
    .bind(order.retailer_name.as_deref())
    .bind(order_date_time)
    .bind(order.expected_delivery)
    .bind(order.delivery_mode.as_deref())
    .bind(order.delivery_service.as_deref())
    .bind(order.delivery_partner_tracking_id.as_deref())
    .bind(delivery_status)
    .bind(order.payment_mode.as_deref())
    .bind(payment_status)
    .bind(order.prescription_file_url.as_deref())
    .bind(order.prescription_verified)
    .bind(order.status.to_string())
    .fetch_one(conn)
    .await?;
    Ok(order_id)
}

/// Returns the order row for the given id, or `None` if it does not exist.
pub async fn fetch_order_by_id(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, SqliteDatabaseError> {
    let q = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1");
    let order = sqlx::query_as::<_, Order>(&q).bind(order_id).fetch_optional(conn).await?;
    Ok(order)
}

/// Fetches orders according to criteria specified in the `OrderQueryFilter`.
///
/// Resulting orders are ordered by `order_date_time` in ascending order.
pub async fn fetch_orders(
    query: &OrderQueryFilter,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new(format!("SELECT {ORDER_COLUMNS} FROM orders "));
    if !query.is_empty() {
        builder.push("WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(customer_id) = query.customer_id {
        where_clause.push("customer_id = ");
        where_clause.push_bind_unseparated(customer_id);
    }
    if let Some(retailer_id) = query.retailer_id {
        where_clause.push("retailer_id = ");
        where_clause.push_bind_unseparated(retailer_id);
    }
    if let Some(statuses) = &query.status {
        if !statuses.is_empty() {
            let status_clause =
                statuses.iter().map(|s| format!("'{s}'")).collect::<Vec<String>>().join(",");
            where_clause.push(format!("status IN ({status_clause})"));
        }
    }
    builder.push(" ORDER BY order_date_time ASC");

    trace!("🗃️ Executing query: {}", builder.sql());
    let orders = builder.build_query_as::<Order>().fetch_all(conn).await?;
    trace!("🗃️ fetch_orders returned {} rows", orders.len());
    Ok(orders)
}

/// Applies the provided fields only. Returns the number of rows that matched.
pub(crate) async fn update_order(
    order_id: i64,
    update: &OrderUpdate,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new("UPDATE orders SET updated_at = CURRENT_TIMESTAMP,");
    let mut set_clause = builder.separated(", ");
    if let Some(retailer_name) = &update.retailer_name {
        set_clause.push("retailer_name = ");
        set_clause.push_bind_unseparated(retailer_name.clone());
    }
    if let Some(expected_delivery) = update.expected_delivery {
        set_clause.push("expected_delivery = ");
        set_clause.push_bind_unseparated(expected_delivery);
    }
    if let Some(delivery_mode) = &update.delivery_mode {
        set_clause.push("delivery_mode = ");
        set_clause.push_bind_unseparated(delivery_mode.clone());
    }
    if let Some(delivery_service) = &update.delivery_service {
        set_clause.push("delivery_service = ");
        set_clause.push_bind_unseparated(delivery_service.clone());
    }
    if let Some(tracking_id) = &update.delivery_partner_tracking_id {
        set_clause.push("delivery_partner_tracking_id = ");
        set_clause.push_bind_unseparated(tracking_id.clone());
    }
    if let Some(delivery_status) = &update.delivery_status {
        set_clause.push("delivery_status = ");
        set_clause.push_bind_unseparated(delivery_status.clone());
    }
    if let Some(payment_mode) = &update.payment_mode {
        set_clause.push("payment_mode = ");
        set_clause.push_bind_unseparated(payment_mode.clone());
    }
    if let Some(payment_status) = &update.payment_status {
        set_clause.push("payment_status = ");
        set_clause.push_bind_unseparated(payment_status.clone());
    }
    if let Some(prescription_file_url) = &update.prescription_file_url {
        set_clause.push("prescription_file_url = ");
        set_clause.push_bind_unseparated(prescription_file_url.clone());
    }
    if let Some(prescription_verified) = update.prescription_verified {
        set_clause.push("prescription_verified = ");
        set_clause.push_bind_unseparated(prescription_verified);
    }
    if let Some(status) = update.status {
        set_clause.push("status = ");
        set_clause.push_bind_unseparated(status.to_string());
    }
    builder.push(" WHERE order_id = ");
    builder.push_bind(order_id);
    trace!("🗃️ Executing query: {}", builder.sql());
    let res = builder.build().execute(conn).await?;
    Ok(res.rows_affected())
}

pub(crate) async fn update_order_status(
    order_id: i64,
    status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let res = sqlx::query("UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE order_id = $2")
        .bind(status.to_string())
        .bind(order_id)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

/// Writes the aggregate total for an order. The caller supplies the sum; see
/// [`crate::db::sqlite::order_items::recompute_order_total`].
pub(crate) async fn update_order_total(
    order_id: i64,
    total_amount: f64,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let res =
        sqlx::query("UPDATE orders SET total_amount = $1, updated_at = CURRENT_TIMESTAMP WHERE order_id = $2")
            .bind(total_amount)
            .bind(order_id)
            .execute(conn)
            .await?;
    Ok(res.rows_affected())
}

/// Deletes the order row only. Child items are removed by
/// [`crate::db::sqlite::order_items::delete_items_for_order`] first.
pub(crate) async fn delete_order_row(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let res = sqlx::query("DELETE FROM orders WHERE order_id = $1").bind(order_id).execute(conn).await?;
    Ok(res.rows_affected())
}
