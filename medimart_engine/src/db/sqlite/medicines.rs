use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{Medicine, MedicineUpdate, NewMedicine},
};

const MEDICINE_COLUMNS: &str = "medicine_id, medicine_category_id, name, generic_name, dosage_form, \
     strength, manufacturer, prescription_required, size, unit_price, therapeutic_class, img_url";

pub async fn insert_medicine(
    medicine: &NewMedicine,
    conn: &mut SqliteConnection,
) -> Result<i64, SqliteDatabaseError> {
    let medicine_id: i64 = sqlx::query_scalar(
        r#"
            INSERT INTO medicines (
                medicine_category_id, name, generic_name, dosage_form, strength, manufacturer,
                prescription_required, size, unit_price, therapeutic_class, img_url
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING medicine_id;
        "#,
    )
    .bind(medicine.medicine_category_id)
    .bind(&medicine.name)
    .bind(medicine.generic_name.as_deref())
    .bind(medicine.dosage_form.as_deref())
    .bind(medicine.strength.as_deref())
    .bind(medicine.manufacturer.as_deref())
    .bind(medicine.prescription_required)
    .bind(medicine.size)
    .bind(medicine.unit_price)
    .bind(medicine.therapeutic_class.as_deref())
    .bind(medicine.img_url.as_deref())
    .fetch_one(conn)
    .await?;
    Ok(medicine_id)
}

pub async fn fetch_medicine_by_id(
    medicine_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Medicine>, SqliteDatabaseError> {
    let q = format!("SELECT {MEDICINE_COLUMNS} FROM medicines WHERE medicine_id = $1");
    let medicine = sqlx::query_as::<_, Medicine>(&q).bind(medicine_id).fetch_optional(conn).await?;
    Ok(medicine)
}

/// Fetches the catalogue, optionally narrowed to one category.
pub async fn fetch_medicines(
    category_id: Option<i64>,
    conn: &mut SqliteConnection,
) -> Result<Vec<Medicine>, SqliteDatabaseError> {
    let medicines = match category_id {
        Some(category_id) => {
            let q = format!(
                "SELECT {MEDICINE_COLUMNS} FROM medicines WHERE medicine_category_id = $1 ORDER BY medicine_id ASC"
            );
            sqlx::query_as::<_, Medicine>(&q).bind(category_id).fetch_all(conn).await?
        },
        None => {
            let q = format!("SELECT {MEDICINE_COLUMNS} FROM medicines ORDER BY medicine_id ASC");
            sqlx::query_as::<_, Medicine>(&q).fetch_all(conn).await?
        },
    };
    Ok(medicines)
}

pub(crate) async fn update_medicine(
    medicine_id: i64,
    update: &MedicineUpdate,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new("UPDATE medicines SET ");
    let mut set_clause = builder.separated(", ");
    macro_rules! push_field {
        ($field:ident) => {
            if let Some(value) = &update.$field {
                set_clause.push(concat!(stringify!($field), " = "));
                set_clause.push_bind_unseparated(value.clone());
            }
        };
    }
    push_field!(medicine_category_id);
    push_field!(name);
    push_field!(generic_name);
    push_field!(dosage_form);
    push_field!(strength);
    push_field!(manufacturer);
    push_field!(prescription_required);
    push_field!(size);
    push_field!(unit_price);
    push_field!(therapeutic_class);
    push_field!(img_url);
    builder.push(" WHERE medicine_id = ");
    builder.push_bind(medicine_id);
    trace!("🗃️ Executing query: {}", builder.sql());
    let res = builder.build().execute(conn).await?;
    Ok(res.rows_affected())
}

pub(crate) async fn delete_medicine(
    medicine_id: i64,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let res = sqlx::query("DELETE FROM medicines WHERE medicine_id = $1").bind(medicine_id).execute(conn).await?;
    Ok(res.rows_affected())
}
