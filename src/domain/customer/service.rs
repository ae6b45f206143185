use std::sync::Arc;

use crate::storage::CustomerStore;

use super::errors::CustomerError;
use super::model::{Customer, CustomerChanges, CustomerRegistration, CustomerUpdateRequest};

// ============================================================================
// Customer Service
// ============================================================================
//
// Orchestrates: request → validation → storage port
//
// The service owns all domain decisions (uniqueness, existence, no-op
// detection); the store underneath only answers existence questions and
// persists what it is told.
//
// ============================================================================

pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// All customers, in the store's stable order.
    pub async fn get_all(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.store.list_all().await?)
    }

    /// Fetch one customer by id.
    pub async fn get(&self, customer_id: i64) -> Result<Customer, CustomerError> {
        self.store
            .find_by_id(customer_id)
            .await?
            .ok_or(CustomerError::NotFound(customer_id))
    }

    /// Register a new customer. The email must not already be in use; a
    /// customer that fails the uniqueness check is never handed to the store.
    pub async fn register(
        &self,
        request: CustomerRegistration,
    ) -> Result<Customer, CustomerError> {
        if self.store.exists_with_email(&request.email).await? {
            return Err(CustomerError::DuplicateEmail(request.email));
        }

        let customer = Customer::new(request.name, request.email, request.age);
        let stored = self.store.insert(customer).await?;

        tracing::info!(customer_id = ?stored.id, "registered customer");
        Ok(stored)
    }

    /// Delete a customer by id. Existence is checked first so a missing id is
    /// reported as `NotFound` rather than silently ignored.
    pub async fn delete(&self, customer_id: i64) -> Result<(), CustomerError> {
        if !self.store.exists_by_id(customer_id).await? {
            return Err(CustomerError::NotFound(customer_id));
        }

        self.store.delete_by_id(customer_id).await?;

        tracing::info!(customer_id, "deleted customer");
        Ok(())
    }

    /// Partial update: stage each supplied field that differs from the
    /// current value, re-check email uniqueness if email is among the staged
    /// fields, and reject the request outright if nothing would change.
    pub async fn update(
        &self,
        customer_id: i64,
        request: CustomerUpdateRequest,
    ) -> Result<Customer, CustomerError> {
        let mut customer = self.get(customer_id).await?;
        let mut changes = CustomerChanges::new(customer_id);

        if let Some(name) = request.name {
            if name != customer.name {
                changes.name = Some(name);
            }
        }
        if let Some(email) = request.email {
            if email != customer.email {
                if self.store.exists_with_email(&email).await? {
                    return Err(CustomerError::DuplicateEmail(email));
                }
                changes.email = Some(email);
            }
        }
        if let Some(age) = request.age {
            if age != customer.age {
                changes.age = Some(age);
            }
        }

        if changes.is_empty() {
            return Err(CustomerError::NoChanges);
        }

        self.store.update(changes.clone()).await?;

        // Mirror the staged fields onto the loaded record for the response.
        if let Some(name) = changes.name {
            customer.name = name;
        }
        if let Some(email) = changes.email {
            customer.email = email;
        }
        if let Some(age) = changes.age {
            customer.age = age;
        }

        tracing::info!(customer_id, "updated customer");
        Ok(customer)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
