use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Customer, CustomerUpdate, NewCustomer},
    helpers::hash_password,
    market_api::errors::CustomerApiError,
    traits::CustomerManagement,
};

/// CRUD surface for customer profiles.
pub struct CustomerApi<B> {
    db: B,
}

impl<B: Debug> Debug for CustomerApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CustomerApi ({:?})", self.db)
    }
}

impl<B> CustomerApi<B>
where B: CustomerManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Registers a new customer. The plaintext password is hashed before it
    /// reaches the backend. Returns the new customer id.
    pub async fn register(&self, customer: NewCustomer) -> Result<i64, CustomerApiError> {
        let password_hash = hash_password(&customer.password);
        let customer_id = self.db.insert_customer(customer, password_hash).await?;
        debug!("🔄️🧑️ Customer {customer_id} registered");
        Ok(customer_id)
    }

    pub async fn customer_by_id(&self, customer_id: i64) -> Result<Customer, CustomerApiError> {
        self.db
            .fetch_customer_by_id(customer_id)
            .await?
            .ok_or(CustomerApiError::CustomerNotFound(customer_id))
    }

    pub async fn customers(&self) -> Result<Vec<Customer>, CustomerApiError> {
        self.db.fetch_customers().await
    }

    pub async fn update_customer(
        &self,
        customer_id: i64,
        update: CustomerUpdate,
    ) -> Result<(), CustomerApiError> {
        if update.is_empty() {
            debug!("🔄️🧑️ No fields to update for customer {customer_id}. Update request skipped.");
            return Ok(());
        }
        let rows = self.db.update_customer(customer_id, update).await?;
        if rows == 0 {
            return Err(CustomerApiError::CustomerNotFound(customer_id));
        }
        Ok(())
    }

    pub async fn delete_customer(&self, customer_id: i64) -> Result<(), CustomerApiError> {
        let rows = self.db.delete_customer(customer_id).await?;
        if rows == 0 {
            return Err(CustomerApiError::CustomerNotFound(customer_id));
        }
        Ok(())
    }
}
