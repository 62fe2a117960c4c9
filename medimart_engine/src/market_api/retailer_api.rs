use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewRetailer, Retailer, RetailerUpdate},
    market_api::errors::RetailerApiError,
    traits::RetailerManagement,
};

/// CRUD surface for retailer profiles.
pub struct RetailerApi<B> {
    db: B,
}

impl<B: Debug> Debug for RetailerApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RetailerApi ({:?})", self.db)
    }
}

impl<B> RetailerApi<B>
where B: RetailerManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn create_retailer(&self, retailer: NewRetailer) -> Result<i64, RetailerApiError> {
        let retailer_id = self
            .db
            .insert_retailer(retailer)
            .await
            .map_err(|e| RetailerApiError::DatabaseError(e.to_string()))?;
        debug!("🔄️🏪️ Retailer {retailer_id} created");
        Ok(retailer_id)
    }

    pub async fn retailer_by_id(&self, retailer_id: i64) -> Result<Retailer, RetailerApiError> {
        self.db
            .fetch_retailer_by_id(retailer_id)
            .await
            .map_err(|e| RetailerApiError::DatabaseError(e.to_string()))?
            .ok_or(RetailerApiError::RetailerNotFound(retailer_id))
    }

    pub async fn retailers(&self) -> Result<Vec<Retailer>, RetailerApiError> {
        self.db.fetch_retailers().await.map_err(|e| RetailerApiError::DatabaseError(e.to_string()))
    }

    pub async fn update_retailer(
        &self,
        retailer_id: i64,
        update: RetailerUpdate,
    ) -> Result<(), RetailerApiError> {
        if update.is_empty() {
            debug!("🔄️🏪️ No fields to update for retailer {retailer_id}. Update request skipped.");
            return Ok(());
        }
        let rows = self
            .db
            .update_retailer(retailer_id, update)
            .await
            .map_err(|e| RetailerApiError::DatabaseError(e.to_string()))?;
        if rows == 0 {
            return Err(RetailerApiError::RetailerNotFound(retailer_id));
        }
        Ok(())
    }

    pub async fn delete_retailer(&self, retailer_id: i64) -> Result<(), RetailerApiError> {
        let rows = self
            .db
            .delete_retailer(retailer_id)
            .await
            .map_err(|e| RetailerApiError::DatabaseError(e.to_string()))?;
        if rows == 0 {
            return Err(RetailerApiError::RetailerNotFound(retailer_id));
        }
        Ok(())
    }
}
