//! # Vireo Register Library
//!
//! Application layer for the Vireo POS register: session lifecycle,
//! permission-gated commands, cart state, and gateways to the catalog
//! and sale services. UI-agnostic; a desktop or browser shell calls the
//! command functions and renders the views they return.
//!
//! ## Module Organization
//! ```text
//! vireo_register/
//! ├── lib.rs          ◄─── You are here (exports & tracing setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState bundle + state type exports
//! │   ├── session.rs  ◄─── Signed-in user state
//! │   ├── cart.rs     ◄─── Cart state + CartView DTO
//! │   ├── pending.rs  ◄─── Held bills state
//! │   └── config.rs   ◄─── Store/currency configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Permission gate helper
//! │   ├── session.rs  ◄─── Sign-in / restore / sign-out
//! │   ├── access.rs   ◄─── Render-gating permission queries
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── checkout.rs ◄─── Checkout, hold, resume
//! ├── gateway/
//! │   ├── mod.rs      ◄─── Gateway traits + error type
//! │   └── memory.rs   ◄─── In-memory doubles for tests & dev
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Option B: Multiple State Types)
//! Instead of one monolithic state struct, commands take only the focused
//! state types they need:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register State Management                            │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │   SessionState   │ │    CartState     │ │    PendingState      │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • Signed-in     │ │  • Current cart  │ │  • Held bills        │   │
//! │  │    user + perms  │ │  • Totals        │ │  • Hold order        │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  WHY: Each command only requests the state it needs.                   │
//! │       Better separation of concerns and testability.                   │
//! │                                                                         │
//! │  [`AppState`] bundles them (plus gateways) for shells that prefer      │
//! │  one managed object.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Embedding
//! ```rust,no_run
//! use vireo_register::{commands, AppState};
//!
//! # async fn demo() -> Result<(), vireo_register::ApiError> {
//! vireo_register::init_tracing();
//!
//! let state = AppState::in_memory();
//! commands::session::restore_session(&state.session, state.session_store.as_ref())?;
//!
//! let view = commands::cart::add_to_cart(
//!     &state.session,
//!     state.catalog.as_ref(),
//!     &state.cart,
//!     101,
//! )
//! .await?;
//! println!("cart total: {}", state.config.format_currency(view.totals.total_cents));
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod error;
pub mod gateway;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use error::{ApiError, ErrorCode};
pub use gateway::{GatewayError, GatewayResult, ProductCatalog, SaleRecorder, SessionStore};
pub use state::{AppState, CartState, CartView, ConfigState, PendingState, SessionState};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=vireo=trace` - Show trace for vireo crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,vireo=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
