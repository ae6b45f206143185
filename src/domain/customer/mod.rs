// ============================================================================
// Customer Domain - Business Logic for Customer Records
// ============================================================================
//
// This module contains ALL Customer-specific code:
// - Models (Customer, registration/update requests, CustomerChanges)
// - Errors (CustomerError enum)
// - Service (CustomerService with validation and partial-update merging)
//
// Persistence lives behind the storage port in `crate::storage`.
//
// ============================================================================

pub mod errors;
pub mod model;
pub mod service;

// Re-export for convenience
pub use errors::*;
pub use model::*;
pub use service::*;
