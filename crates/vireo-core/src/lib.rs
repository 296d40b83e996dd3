//! # vireo-core: Pure Business Logic for Vireo POS
//!
//! This crate is the **heart** of the Vireo register client. It contains
//! the permission evaluator and the cart calculator as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Vireo Register Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI (screens)                      │   │
//! │  │    Sign-in ──► Sidebar ──► POS screen ──► Checkout dialog      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ command calls                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              vireo-register (application layer)                 │   │
//! │  │    sign_in, add_to_cart, checkout, suspend_sale, etc.          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vireo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  access   │  │  session  │  │   cart    │  │   money   │  │   │
//! │  │   │   Role    │  │ Session-  │  │   Cart    │  │   Money   │  │   │
//! │  │   │ UserPerms │  │   User    │  │ CartLine  │  │  (cents)  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Remote collaborators (behind gateways)               │   │
//! │  │     auth service, product catalog, sale recording, storage      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`access`] - Roles, sections, and the permission record
//! - [`session`] - The signed-in user and the single admin override
//! - [`cart`] - The live cart, held bills, and order materialization
//! - [`types`] - Product snapshots, payment methods, finalized orders
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, storage, and even the clock are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Fail Closed**: Any authorization question that can't be answered "yes" is "no"
//!
//! ## Example Usage
//!
//! ```rust
//! use vireo_core::access::{Action, Section, UserPermissions};
//! use vireo_core::cart::Cart;
//! use vireo_core::money::Money;
//! use vireo_core::types::ProductSnapshot;
//! use serde_json::json;
//!
//! // Decode a permission payload (tolerant, fail-closed)
//! let perms = UserPermissions::decode(&json!({ "pos": { "view": true } }));
//! assert!(perms.allows(Section::Pos, Action::View));
//! assert!(!perms.allows(Section::Pos, Action::Delete));
//!
//! // Ring up a sale
//! let mut cart = Cart::new();
//! let cola = ProductSnapshot::new(1, "Cola", Money::from_cents(299)).unwrap();
//! cart.add_item(cola.clone());
//! cart.add_item(cola);
//! assert_eq!(cart.total(), Money::from_cents(598));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod cart;
pub mod error;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vireo_core::Money` instead of
// `use vireo_core::money::Money`

pub use access::{Action, Role, Section, SectionPermissions, UserPermissions};
pub use cart::{Cart, CartLine, PendingBill};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::SessionUser;
pub use types::{Order, OrderLine, PaymentMethod, ProductSnapshot};
