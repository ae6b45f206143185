use async_trait::async_trait;

use crate::domain::customer::{Customer, CustomerChanges};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCustomerStore;
pub use postgres::PostgresCustomerStore;

// ============================================================================
// Storage Port
// ============================================================================
//
// The capability set any customer store must implement. The service treats
// implementations as interchangeable; both ship here (in-memory for
// demos/tests, Postgres for real deployments) and the active one is chosen
// once at startup.
//
// Stores never raise domain errors. They answer existence questions and
// persist what the service already validated.
//
// ============================================================================

/// Infrastructure fault from a backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All stored customers in the store's stable order. Side-effect free.
    async fn list_all(&self) -> Result<Vec<Customer>, StoreError>;

    /// The matching record, or `None`. Side-effect free.
    async fn find_by_id(&self, customer_id: i64) -> Result<Option<Customer>, StoreError>;

    /// Persist a new record and assign its id. The caller guarantees the
    /// email is not already in use.
    async fn insert(&self, customer: Customer) -> Result<Customer, StoreError>;

    /// Existence check backing email-uniqueness enforcement.
    async fn exists_with_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Existence check run before delete/update paths.
    async fn exists_by_id(&self, customer_id: i64) -> Result<bool, StoreError>;

    /// Remove the record. A missing id is a no-op, not an error; callers are
    /// expected to have checked existence first.
    async fn delete_by_id(&self, customer_id: i64) -> Result<(), StoreError>;

    /// Apply a field-level diff to an existing record. Only the `Some`
    /// fields of `changes` are touched.
    async fn update(&self, changes: CustomerChanges) -> Result<(), StoreError>;
}
