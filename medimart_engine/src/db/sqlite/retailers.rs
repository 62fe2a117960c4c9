use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewRetailer, Retailer, RetailerUpdate},
};

const RETAILER_COLUMNS: &str = "retailer_id, shop_name, owner_name, email, phone_number, address_line1, \
     address_line2, city, state, country, postal_code, latitude, longitude, created_at, updated_at";

pub async fn insert_retailer(
    retailer: &NewRetailer,
    conn: &mut SqliteConnection,
) -> Result<i64, SqliteDatabaseError> {
    let retailer_id: i64 = sqlx::query_scalar(
        r#"
            INSERT INTO retailers (
                shop_name, owner_name, email, phone_number, address_line1, address_line2,
                city, state, country, postal_code, latitude, longitude
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING retailer_id;
        "#,
    )
    .bind(&retailer.shop_name)
    .bind(retailer.owner_name.as_deref())
    .bind(retailer.email.as_deref())
    .bind(retailer.phone_number.as_deref())
    .bind(retailer.address_line1.as_deref())
    .bind(retailer.address_line2.as_deref())
    .bind(retailer.city.as_deref())
    .bind(retailer.state.as_deref())
    .bind(retailer.country.as_deref())
    .bind(retailer.postal_code.as_deref())
    .bind(retailer.latitude)
    .bind(retailer.longitude)
    .fetch_one(conn)
    .await?;
    Ok(retailer_id)
}

pub async fn fetch_retailer_by_id(
    retailer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Retailer>, SqliteDatabaseError> {
    let q = format!("SELECT {RETAILER_COLUMNS} FROM retailers WHERE retailer_id = $1");
    let retailer = sqlx::query_as::<_, Retailer>(&q).bind(retailer_id).fetch_optional(conn).await?;
    Ok(retailer)
}

pub async fn fetch_retailers(conn: &mut SqliteConnection) -> Result<Vec<Retailer>, SqliteDatabaseError> {
    let q = format!("SELECT {RETAILER_COLUMNS} FROM retailers ORDER BY retailer_id ASC");
    let retailers = sqlx::query_as::<_, Retailer>(&q).fetch_all(conn).await?;
    Ok(retailers)
}

pub(crate) async fn update_retailer(
    retailer_id: i64,
    update: &RetailerUpdate,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new("UPDATE retailers SET updated_at = CURRENT_TIMESTAMP,");
    let mut set_clause = builder.separated(", ");
    macro_rules! push_field {
        ($field:ident) => {
            if let Some(value) = &update.$field {
                set_clause.push(concat!(stringify!($field), " = "));
                set_clause.push_bind_unseparated(value.clone());
            }
        };
    }
    push_field!(shop_name);
    push_field!(owner_name);
    push_field!(email);
    push_field!(phone_number);
    push_field!(address_line1);
    push_field!(address_line2);
    push_field!(city);
    push_field!(state);
    push_field!(country);
    push_field!(postal_code);
    push_field!(latitude);
    push_field!(longitude);
    builder.push(" WHERE retailer_id = ");
    builder.push_bind(retailer_id);
    trace!("🗃️ Executing query: {}", builder.sql());
    let res = builder.build().execute(conn).await?;
    Ok(res.rows_affected())
}

pub(crate) async fn delete_retailer(
    retailer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let res = sqlx::query("DELETE FROM retailers WHERE retailer_id = $1").bind(retailer_id).execute(conn).await?;
    Ok(res.rows_affected())
}
