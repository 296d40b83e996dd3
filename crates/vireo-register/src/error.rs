//! # API Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vireo POS                              │
//! │                                                                         │
//! │  Storefront Shell            Register Library                           │
//! │  ────────────────            ────────────────                           │
//! │                                                                         │
//! │  invoke('checkout')                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Gateway Error? ─── GatewayError::Unavailable ─────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Business Error? ── CoreError::EmptyCart ──────── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  try {                                                                  │
//! │    await invoke('checkout')                                             │
//! │  } catch (e) {                                                          │
//! │    // e.message = "Service unavailable: connection refused"             │
//! │    // e.code = "GATEWAY_ERROR"                                          │
//! │  }                                                                      │
//! │                                                                         │
//! │  NOTE: a permission gate refusing a command is an ApiError with         │
//! │  code FORBIDDEN. The evaluator itself never errors; only the            │
//! │  command boundary turns "false" into a refusal.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use vireo_core::access::{Action, Section};
use vireo_core::CoreError;

use crate::gateway::GatewayError;

/// API error returned from register commands.
///
/// ## Serialization
/// This is what the shell receives when a command fails:
/// ```json
/// {
///   "code": "FORBIDDEN",
///   "message": "Not permitted: create in pos"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await invoke('add_to_cart', { productId });
/// } catch (e) {
///   switch (e.code) {
///     case 'UNAUTHORIZED':
///       redirectToSignIn();
///       break;
///     case 'FORBIDDEN':
///       showNotification('You do not have access to this');
///       break;
///     default:
///       showError(e.message);
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// No user is signed in (401)
    Unauthorized,

    /// Signed in, but the permission record denies this (403)
    Forbidden,

    /// Cart operation failed
    CartError,

    /// Payment input problem
    PaymentError,

    /// A remote collaborator failed (502)
    GatewayError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a signed-out error.
    pub fn unauthorized() -> Self {
        ApiError::new(ErrorCode::Unauthorized, "No user is signed in")
    }

    /// Creates a permission-denied error for a section/action pair.
    pub fn forbidden(section: Section, action: Action) -> Self {
        ApiError::new(
            ErrorCode::Forbidden,
            format!("Not permitted: {} in {}", action.as_str(), section.as_str()),
        )
    }

    /// Creates a payment error.
    pub fn payment(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::PaymentError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, "Cart is empty"),
            CoreError::SaleInProgress => ApiError::new(
                ErrorCode::CartError,
                "A sale is already in progress; complete or hold it first",
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts gateway errors to API errors.
impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unavailable(detail) => {
                // Log the transport detail but keep the surfaced message generic
                tracing::error!(detail = %detail, "Gateway unavailable");
                ApiError::new(ErrorCode::GatewayError, "Could not reach the sales service")
            }
            GatewayError::Rejected { reason } => {
                // Backend rejections carry user-meaningful reasons
                ApiError::new(ErrorCode::GatewayError, reason)
            }
            GatewayError::Timeout => {
                ApiError::new(ErrorCode::GatewayError, "The request timed out")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
