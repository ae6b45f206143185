use crate::storage::StoreError;

// ============================================================================
// Customer Domain Errors
// ============================================================================
//
// All three domain outcomes are raised by the service layer, never by a
// store. Stores only report existence/absence plus infrastructure faults,
// which travel through the `Storage` variant.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("customer with id [{0}] not found")]
    NotFound(i64),

    #[error("email already taken: {0}")]
    DuplicateEmail(String),

    #[error("no data changes found")]
    NoChanges,

    #[error(transparent)]
    Storage(#[from] StoreError),
}
