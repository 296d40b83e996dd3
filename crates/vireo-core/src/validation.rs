//! # Validation Module
//!
//! Input validation for data entering the core from the outside
//! (product snapshots from the catalog, usernames from the login form).
//!
//! ## Design Philosophy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  VALIDATE AT THE BOUNDARY                                               │
//! │                                                                         │
//! │  Catalog / UI input ──► validation ──► trusted core types              │
//! │                                                                         │
//! │  Once a ProductSnapshot exists, the cart never re-checks it.           │
//! │  Validation failures are reported as structured errors so the UI       │
//! │  can highlight the offending field.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result alias for validation functions.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Limits
// =============================================================================

/// Maximum length for product names.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length for usernames.
pub const MAX_USERNAME_LEN: usize = 50;

// =============================================================================
// Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must not exceed 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required("product name"));
    }
    if trimmed.len() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::too_long("product name", MAX_PRODUCT_NAME_LEN));
    }
    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must not be negative (zero is allowed for giveaway items)
pub fn validate_unit_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::out_of_range("unit price", 0, i64::MAX));
    }
    Ok(())
}

/// Validates a username.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must not exceed 50 characters
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required("username"));
    }
    if trimmed.len() > MAX_USERNAME_LEN {
        return Err(ValidationError::too_long("username", MAX_USERNAME_LEN));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
