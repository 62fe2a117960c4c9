use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewPrescription, Prescription},
    market_api::errors::PrescriptionApiError,
    traits::PrescriptionManagement,
};

/// CRUD surface for prescription documents attached to orders.
pub struct PrescriptionApi<B> {
    db: B,
}

impl<B: Debug> Debug for PrescriptionApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrescriptionApi ({:?})", self.db)
    }
}

impl<B> PrescriptionApi<B>
where B: PrescriptionManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn upload(&self, prescription: NewPrescription) -> Result<i64, PrescriptionApiError> {
        let prescription_id = self
            .db
            .insert_prescription(prescription)
            .await
            .map_err(|e| PrescriptionApiError::DatabaseError(e.to_string()))?;
        debug!("🔄️📋️ Prescription {prescription_id} uploaded");
        Ok(prescription_id)
    }

    pub async fn prescription_by_id(&self, prescription_id: i64) -> Result<Prescription, PrescriptionApiError> {
        self.db
            .fetch_prescription_by_id(prescription_id)
            .await
            .map_err(|e| PrescriptionApiError::DatabaseError(e.to_string()))?
            .ok_or(PrescriptionApiError::PrescriptionNotFound(prescription_id))
    }

    pub async fn prescriptions_for_order(&self, order_id: i64) -> Result<Vec<Prescription>, PrescriptionApiError> {
        self.db
            .fetch_prescriptions_for_order(order_id)
            .await
            .map_err(|e| PrescriptionApiError::DatabaseError(e.to_string()))
    }

    /// Marks a prescription verified, recording the verifier's name.
    pub async fn verify(&self, prescription_id: i64, verified_by: String) -> Result<(), PrescriptionApiError> {
        let rows = self
            .db
            .verify_prescription(prescription_id, verified_by)
            .await
            .map_err(|e| PrescriptionApiError::DatabaseError(e.to_string()))?;
        if rows == 0 {
            return Err(PrescriptionApiError::PrescriptionNotFound(prescription_id));
        }
        debug!("🔄️📋️ Prescription {prescription_id} verified");
        Ok(())
    }

    pub async fn delete_prescription(&self, prescription_id: i64) -> Result<(), PrescriptionApiError> {
        let rows = self
            .db
            .delete_prescription(prescription_id)
            .await
            .map_err(|e| PrescriptionApiError::DatabaseError(e.to_string()))?;
        if rows == 0 {
            return Err(PrescriptionApiError::PrescriptionNotFound(prescription_id));
        }
        Ok(())
    }
}
