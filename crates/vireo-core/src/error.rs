//! # Error Types
//!
//! Domain-specific error types for vireo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vireo-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vireo-register errors (separate crate)                                │
//! │  ├── GatewayError     - Remote collaborator failures                   │
//! │  └── ApiError         - What the UI shell sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! │                                                                         │
//! │  NOTE: permission denial is NOT an error anywhere in this hierarchy.   │
//! │  The evaluator answers with a boolean and the caller decides what to   │
//! │  render or refuse (see `session::SessionUser::has_permission`).        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field names, limits)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// by the application layer and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart has no lines, so there is nothing to finalize.
    ///
    /// ## When This Occurs
    /// - Checkout invoked before any product was added
    /// - Checkout retried after the cart was already cleared
    #[error("Cart is empty")]
    EmptyCart,

    /// A pending bill cannot be restored while the active cart holds lines.
    ///
    /// ## When This Occurs
    /// - Cashier tries to resume a held bill mid-sale. The in-progress sale
    ///   must be completed, suspended, or cleared first.
    #[error("A sale is already in progress")]
    SaleInProgress,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when data arriving at a boundary (catalog snapshot,
/// sign-in payload) doesn't meet requirements. Used for early validation
/// before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a TooLong error for the given field.
    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
        }
    }

    /// Creates an OutOfRange error for the given field.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
