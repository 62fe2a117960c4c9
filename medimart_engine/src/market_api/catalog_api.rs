use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Medicine, MedicineUpdate, NewMedicine},
    market_api::errors::CatalogApiError,
    traits::MedicineManagement,
};

/// CRUD surface for the medicine catalogue.
pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

impl<B> CatalogApi<B>
where B: MedicineManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn create_medicine(&self, medicine: NewMedicine) -> Result<i64, CatalogApiError> {
        let medicine_id = self
            .db
            .insert_medicine(medicine)
            .await
            .map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        debug!("🔄️💊️ Medicine {medicine_id} added to the catalogue");
        Ok(medicine_id)
    }

    pub async fn medicine_by_id(&self, medicine_id: i64) -> Result<Medicine, CatalogApiError> {
        self.db
            .fetch_medicine_by_id(medicine_id)
            .await
            .map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?
            .ok_or(CatalogApiError::MedicineNotFound(medicine_id))
    }

    /// The catalogue, optionally narrowed to one category.
    pub async fn medicines(&self, category_id: Option<i64>) -> Result<Vec<Medicine>, CatalogApiError> {
        self.db.fetch_medicines(category_id).await.map_err(|e| CatalogApiError::DatabaseError(e.to_string()))
    }

    pub async fn update_medicine(
        &self,
        medicine_id: i64,
        update: MedicineUpdate,
    ) -> Result<(), CatalogApiError> {
        if update.is_empty() {
            debug!("🔄️💊️ No fields to update for medicine {medicine_id}. Update request skipped.");
            return Ok(());
        }
        let rows = self
            .db
            .update_medicine(medicine_id, update)
            .await
            .map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        if rows == 0 {
            return Err(CatalogApiError::MedicineNotFound(medicine_id));
        }
        Ok(())
    }

    pub async fn delete_medicine(&self, medicine_id: i64) -> Result<(), CatalogApiError> {
        let rows = self
            .db
            .delete_medicine(medicine_id)
            .await
            .map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        if rows == 0 {
            return Err(CatalogApiError::MedicineNotFound(medicine_id));
        }
        Ok(())
    }
}
