use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewPrescription, Prescription},
};

const PRESCRIPTION_COLUMNS: &str = "prescription_id, customer_id, order_id, doctor_name, document_url, \
     status, verified, verified_by, uploaded_at";

pub async fn insert_prescription(
    prescription: &NewPrescription,
    conn: &mut SqliteConnection,
) -> Result<i64, SqliteDatabaseError> {
    let status = prescription.status.clone().unwrap_or_else(|| "Pending".to_string());
    let prescription_id: i64 = sqlx::query_scalar(
        r#"
            INSERT INTO prescriptions (customer_id, order_id, doctor_name, document_url, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING prescription_id;
        "#,
    )
    .bind(prescription.customer_id)
    .bind(prescription.order_id)
    .bind(prescription.doctor_name.as_deref())
    .bind(&prescription.document_url)
    .bind(status)
    .fetch_one(conn)
    .await?;
    Ok(prescription_id)
}

pub async fn fetch_prescription_by_id(
    prescription_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Prescription>, SqliteDatabaseError> {
    let q = format!("SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions WHERE prescription_id = $1");
    let prescription =
        sqlx::query_as::<_, Prescription>(&q).bind(prescription_id).fetch_optional(conn).await?;
    Ok(prescription)
}

pub async fn fetch_prescriptions_for_order(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Prescription>, SqliteDatabaseError> {
    let q = format!(
        "SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions WHERE order_id = $1 ORDER BY prescription_id ASC"
    );
    let prescriptions = sqlx::query_as::<_, Prescription>(&q).bind(order_id).fetch_all(conn).await?;
    Ok(prescriptions)
}

/// Marks a prescription as verified and records who verified it.
pub(crate) async fn mark_verified(
    prescription_id: i64,
    verified_by: &str,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let res = sqlx::query(
        "UPDATE prescriptions SET verified = 1, status = 'Verified', verified_by = $1 WHERE prescription_id = $2",
    )
    .bind(verified_by)
    .bind(prescription_id)
    .execute(conn)
    .await?;
    Ok(res.rows_affected())
}

pub(crate) async fn delete_prescription(
    prescription_id: i64,
    conn: &mut SqliteConnection,
) -> Result<u64, SqliteDatabaseError> {
    let res = sqlx::query("DELETE FROM prescriptions WHERE prescription_id = $1")
        .bind(prescription_id)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}
