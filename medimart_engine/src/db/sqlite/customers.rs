use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{Customer, CustomerUpdate, NewCustomer},
};

const CUSTOMER_COLUMNS: &str = "customer_id, full_name, profile_picture, date_of_birth, gender, email, \
     password_hash, phone_number, address_line1, address_line2, city, state, country, postal_code, \
     latitude, longitude, bank_name, account_number, ifsc_code, branch, created_at, updated_at";

/// Inserts a customer row. The caller supplies the already-hashed password;
/// see [`crate::helpers::hash_password`].
pub async fn insert_customer(
    customer: &NewCustomer,
    password_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<i64, SqliteDatabaseError> {
    let result = sqlx::query_scalar::<_, i64>(
        r#"
            INSERT INTO customers (
                full_name, profile_picture, date_of_birth, gender, email, password_hash, phone_number,
                address_line1, address_line2, city, state, country, postal_code, latitude, longitude,
                bank_name, account_number, ifsc_code, branch
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING customer_id;
        "#,
    )
    .bind(customer.full_name.as_deref())
    .bind(customer.profile_picture.as_deref())
    .bind(customer.date_of_birth)
    .bind(customer.gender.as_deref())
    .bind(&customer.email)
    .bind(password_hash)
    .bind(customer.phone_number.as_deref())
    .bind(&customer.address_line1)
    .bind(customer.address_line2.as_deref())
    .bind(&customer.city)
    .bind(&customer.state)
    .bind(&customer.country)
    .bind(&customer.postal_code)
    .bind(customer.latitude)
    .bind(customer.longitude)
    .bind(customer.bank_name.as_deref())
    .bind(customer.account_number.as_deref())
    .bind(customer.ifsc_code.as_deref())
    .bind(customer.branch.as_deref())
    .fetch_one(conn)
    .await;
    match result {
        Ok(id) => Ok(id),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(SqliteDatabaseError::DuplicateEmail(customer.email.clone()))
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn fetch_customer_by_id(
    customer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Customer>, SqliteDatabaseError> {
    let q = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE customer_id = $1");
    let customer = sqlx::query_as::<_, Customer>(&q).bind(customer_id).fetch_optional(conn).await?;
    Ok(customer)
}

pub async fn fetch_customers(conn: &mut SqliteConnection) -> Result<Vec<Customer>, SqliteDatabaseError> {
    let q = format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY customer_id ASC");
    let customers = sqlx::query_as::<_, Customer>(&q).fetch_all(conn).await?;
    Ok(customers)
}

pub(crate) async fn update_customer(
    customer_id: i64,
    update: &CustomerUpdate,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new("UPDATE customers SET updated_at = CURRENT_TIMESTAMP,");
    let mut set_clause = builder.separated(", ");
    macro_rules! push_field {
        ($field:ident) => {
            if let Some(value) = &update.$field {
                set_clause.push(concat!(stringify!($field), " = "));
                set_clause.push_bind_unseparated(value.clone());
            }
        };
    }
    push_field!(full_name);
    push_field!(profile_picture);
    push_field!(date_of_birth);
    push_field!(gender);
    push_field!(phone_number);
    push_field!(address_line1);
    push_field!(address_line2);
    push_field!(city);
    push_field!(state);
    push_field!(country);
    push_field!(postal_code);
    push_field!(latitude);
    push_field!(longitude);
    push_field!(bank_name);
    push_field!(account_number);
    push_field!(ifsc_code);
    push_field!(branch);
    builder.push(" WHERE customer_id = ");
    builder.push_bind(customer_id);
    trace!("🗃️ Executing query: {}", builder.sql());
    let res = builder.build().execute(conn).await?;
    Ok(res.rows_affected())
}

pub(crate) async fn delete_customer(
    customer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let res = sqlx::query("DELETE FROM customers WHERE customer_id = $1").bind(customer_id).execute(conn).await?;
    Ok(res.rows_affected())
}
