use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db::sqlite::{orders, SqliteDatabaseError},
    db_types::{NewOrderItem, OrderItem, OrderItemUpdate},
};

const ITEM_COLUMNS: &str =
    "order_item_id, order_id, medicine_id, medicine_name, quantity, price, total_amount";

/// Inserts a line item for the given order. The stored line total is
/// `price * quantity`; the parent order's aggregate is NOT touched here. Run
/// [`recompute_order_total`] in the same transaction.
pub async fn insert_item(
    order_id: i64,
    item: &NewOrderItem,
    conn: &mut SqliteConnection,
) -> Result<i64, SqliteDatabaseError> {
    let item_id: i64 = sqlx::query_scalar(
        r#"
            INSERT INTO order_items (order_id, medicine_id, medicine_name, quantity, price, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING order_item_id;
        "#,
    )
    .bind(order_id)
    .bind(item.medicine_id)
    .bind(item.medicine_name.as_deref())
    .bind(item.quantity)
    .bind(item.price)
    .bind(item.line_total())
    .fetch_one(conn)
    .await?;
    Ok(item_id)
}

pub async fn fetch_item_by_id(
    item_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<OrderItem>, SqliteDatabaseError> {
    let q = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_item_id = $1");
    let item = sqlx::query_as::<_, OrderItem>(&q).bind(item_id).fetch_optional(conn).await?;
    Ok(item)
}

pub async fn fetch_items_for_order(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderItem>, SqliteDatabaseError> {
    let q = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY order_item_id ASC");
    let items = sqlx::query_as::<_, OrderItem>(&q).bind(order_id).fetch_all(conn).await?;
    Ok(items)
}

/// Applies the provided fields, then refreshes the stored line total from the
/// resulting row. Returns the number of rows that matched.
pub(crate) async fn update_item(
    item_id: i64,
    update: &OrderItemUpdate,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new("UPDATE order_items SET ");
    let mut set_clause = builder.separated(", ");
    if let Some(medicine_id) = update.medicine_id {
        set_clause.push("medicine_id = ");
        set_clause.push_bind_unseparated(medicine_id);
    }
    if let Some(medicine_name) = &update.medicine_name {
        set_clause.push("medicine_name = ");
        set_clause.push_bind_unseparated(medicine_name.clone());
    }
    if let Some(quantity) = update.quantity {
        set_clause.push("quantity = ");
        set_clause.push_bind_unseparated(quantity);
    }
    if let Some(price) = update.price {
        set_clause.push("price = ");
        set_clause.push_bind_unseparated(price);
    }
    builder.push(" WHERE order_item_id = ");
    builder.push_bind(item_id);
    trace!("🗃️ Executing query: {}", builder.sql());
    let rows = builder.build().execute(&mut *conn).await?.rows_affected();
    if rows > 0 {
        sqlx::query("UPDATE order_items SET total_amount = price * quantity WHERE order_item_id = $1")
            .bind(item_id)
            .execute(conn)
            .await?;
    }
    Ok(rows)
}

pub(crate) async fn delete_item(item_id: i64, conn: &mut SqliteConnection) -> Result<u64, SqliteDatabaseError> {
    let res =
        sqlx::query("DELETE FROM order_items WHERE order_item_id = $1").bind(item_id).execute(conn).await?;
    Ok(res.rows_affected())
}

pub(crate) async fn delete_items_for_order(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let res = sqlx::query("DELETE FROM order_items WHERE order_id = $1").bind(order_id).execute(conn).await?;
    Ok(res.rows_affected())
}

/// Re-reads every item for the order, sums the line totals and writes the
/// result back to the order row. A full re-read rather than an incremental
/// adjustment, so a recompute always repairs a stale aggregate.
pub(crate) async fn recompute_order_total(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<f64, SqliteDatabaseError> {
    let items = fetch_items_for_order(order_id, &mut *conn).await?;
    let total_amount: f64 = items.iter().map(|i| i.total_amount).sum();
    orders::update_order_total(order_id, total_amount, conn).await?;
    trace!("🗃️ Order {order_id} total recomputed from {} items: {total_amount}", items.len());
    Ok(total_amount)
}
