use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::customer::{Customer, CustomerChanges};

use super::{CustomerStore, StoreError};

// ============================================================================
// In-Memory Customer Store
// ============================================================================
//
// Process-local ordered collection behind a RwLock. Linear scans for every
// lookup; nothing survives a restart. Used for demos and tests.
//
// An instance is owned by whoever constructs the service (no global state),
// so each test case gets its own isolated store.
//
// ============================================================================

struct Inner {
    customers: Vec<Customer>,
    next_id: i64,
}

pub struct InMemoryCustomerStore {
    inner: RwLock<Inner>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                customers: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Pre-populate the store with fixture records carrying externally
    /// supplied ids. The id counter starts past the highest seeded id so
    /// later inserts stay monotonic.
    pub fn with_seed(customers: Vec<Customer>) -> Self {
        let next_id = customers
            .iter()
            .filter_map(|c| c.id)
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            inner: RwLock::new(Inner { customers, next_id }),
        }
    }
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn list_all(&self) -> Result<Vec<Customer>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.customers.clone())
    }

    async fn find_by_id(&self, customer_id: i64) -> Result<Option<Customer>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .customers
            .iter()
            .find(|c| c.id == Some(customer_id))
            .cloned())
    }

    async fn insert(&self, mut customer: Customer) -> Result<Customer, StoreError> {
        let mut inner = self.inner.write().await;
        customer.id = Some(inner.next_id);
        inner.next_id += 1;
        inner.customers.push(customer.clone());
        Ok(customer)
    }

    async fn exists_with_email(&self, email: &str) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.customers.iter().any(|c| c.email == email))
    }

    async fn exists_by_id(&self, customer_id: i64) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.customers.iter().any(|c| c.id == Some(customer_id)))
    }

    async fn delete_by_id(&self, customer_id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.customers.retain(|c| c.id != Some(customer_id));
        Ok(())
    }

    async fn update(&self, changes: CustomerChanges) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(customer) = inner
            .customers
            .iter_mut()
            .find(|c| c.id == Some(changes.id))
        {
            if let Some(name) = changes.name {
                customer.name = name;
            }
            if let Some(email) = changes.email {
                customer.email = email;
            }
            if let Some(age) = changes.age {
                customer.age = age;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn alex() -> Customer {
        Customer {
            id: Some(1),
            name: "Alex".to_string(),
            email: "alex@x.com".to_string(),
            age: 19,
        }
    }

    #[tokio::test]
    async fn insert_assigns_monotonic_ids() {
        let store = InMemoryCustomerStore::new();

        let first = store
            .insert(Customer::new("A", "a@x.com", 20))
            .await
            .unwrap();
        let second = store
            .insert(Customer::new("B", "b@x.com", 21))
            .await
            .unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn seeded_ids_are_respected_and_counter_starts_past_them() {
        let store = InMemoryCustomerStore::with_seed(vec![alex()]);

        let inserted = store
            .insert(Customer::new("Jamila", "jamila@x.com", 14))
            .await
            .unwrap();

        assert_eq!(inserted.id, Some(2));
        assert!(store.exists_by_id(1).await.unwrap());
        assert!(store.exists_by_id(2).await.unwrap());
    }

    #[tokio::test]
    async fn list_all_preserves_insertion_order() {
        let store = InMemoryCustomerStore::new();
        store.insert(Customer::new("A", "a@x.com", 20)).await.unwrap();
        store.insert(Customer::new("B", "b@x.com", 21)).await.unwrap();

        let all = store.list_all().await.unwrap();

        assert_eq!(all[0].name, "A");
        assert_eq!(all[1].name, "B");
    }

    #[tokio::test]
    async fn delete_missing_id_is_a_noop() {
        let store = InMemoryCustomerStore::with_seed(vec![alex()]);

        store.delete_by_id(99).await.unwrap();

        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_touches_only_staged_fields() {
        let store = InMemoryCustomerStore::with_seed(vec![alex()]);

        let mut changes = CustomerChanges::new(1);
        changes.age = Some(22);
        store.update(changes).await.unwrap();

        let reloaded = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(reloaded.name, "Alex");
        assert_eq!(reloaded.email, "alex@x.com");
        assert_eq!(reloaded.age, 22);
    }

    #[tokio::test]
    async fn exists_with_email_matches_exactly() {
        let store = InMemoryCustomerStore::with_seed(vec![alex()]);

        assert!(store.exists_with_email("alex@x.com").await.unwrap());
        assert!(!store.exists_with_email("ALEX@x.com").await.unwrap());
        assert!(!store.exists_with_email("other@x.com").await.unwrap());
    }
}
