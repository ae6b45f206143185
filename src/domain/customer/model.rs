use serde::{Deserialize, Serialize};

// ============================================================================
// Customer Domain Models
// ============================================================================

/// A customer record as stored and served.
///
/// `id` is `None` until the storage layer assigns one at insert time and is
/// never reassigned afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl Customer {
    /// Build an id-less customer from registration data. The store assigns
    /// the id when the record is persisted.
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            age,
        }
    }
}

/// Payload for `POST /api/v1/customers`. All fields required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRegistration {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Payload for `PUT /api/v1/customers/{id}`. Every field is optional; omitted
/// fields are left untouched by the update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

/// Field-level diff computed by the service and handed to the storage port.
///
/// `Some` means "this field changed, persist the new value". Each store
/// decides how many statements that becomes.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerChanges {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl CustomerChanges {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            email: None,
            age: None,
        }
    }

    /// True when no field was staged, i.e. the update would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_customer_has_no_id() {
        let customer = Customer::new("Alex", "alex@gmail.com", 19);
        assert_eq!(customer.id, None);
        assert_eq!(customer.name, "Alex");
        assert_eq!(customer.email, "alex@gmail.com");
        assert_eq!(customer.age, 19);
    }

    #[test]
    fn update_request_deserializes_missing_fields_as_none() {
        let request: CustomerUpdateRequest = serde_json::from_str(r#"{"age": 22}"#).unwrap();
        assert_eq!(request.name, None);
        assert_eq!(request.email, None);
        assert_eq!(request.age, Some(22));
    }

    #[test]
    fn changes_with_no_staged_fields_are_empty() {
        let mut changes = CustomerChanges::new(1);
        assert!(changes.is_empty());

        changes.age = Some(22);
        assert!(!changes.is_empty());
    }
}
