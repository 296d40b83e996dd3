//! # State Module
//!
//! Manages application state for the register.
//!
//! ## Why Multiple State Types? (Option B)
//! Instead of a single struct containing everything behind one lock,
//! we use separate state types. This approach:
//!
//! 1. **Better Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: Tests construct only the states they need
//! 3. **Clearer Command Signatures**: Commands declare exactly what state they touch
//! 4. **Reduced Contention**: A long catalog lookup never blocks a gate check
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │ SessionState │  │  CartState   │  │ PendingState │  │ConfigState │  │
//! │  │              │  │              │  │              │  │            │  │
//! │  │ Arc<RwLock<  │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │ store name │  │
//! │  │  Option<     │  │    Cart      │  │ Vec<Pending  │  │ currency   │  │
//! │  │  SessionUser │  │  >>          │  │   Bill>>>    │  │ (read-only)│  │
//! │  │  >>>         │  │              │  │              │  │            │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: RwLock (read-heavy: checked on every render)          │
//! │  • CartState / PendingState: Mutex for exclusive mutation              │
//! │  • ConfigState: read-only after initialization, no lock                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod pending;
mod session;

pub use cart::{CartLineView, CartState, CartTotals, CartView};
pub use config::ConfigState;
pub use pending::{PendingBillView, PendingState};
pub use session::SessionState;

use std::sync::Arc;

use crate::gateway::{
    MemoryCatalog, MemorySaleRecorder, MemorySessionStore, ProductCatalog, SaleRecorder,
    SessionStore,
};

/// Everything a shell needs to drive the register, assembled.
///
/// Commands take the individual pieces (Option B above); this struct only
/// exists so an embedding shell wires them up once and hands them out.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub cart: CartState,
    pub pending: PendingState,
    pub config: ConfigState,
    pub session_store: Arc<dyn SessionStore>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub recorder: Arc<dyn SaleRecorder>,
}

impl AppState {
    /// Assembles app state around the given gateways.
    pub fn new(
        config: ConfigState,
        session_store: Arc<dyn SessionStore>,
        catalog: Arc<dyn ProductCatalog>,
        recorder: Arc<dyn SaleRecorder>,
    ) -> Self {
        AppState {
            session: SessionState::new(),
            cart: CartState::new(),
            pending: PendingState::new(),
            config,
            session_store,
            catalog,
            recorder,
        }
    }

    /// Assembles app state with in-memory gateways. Dev builds and tests.
    pub fn in_memory() -> Self {
        AppState::new(
            ConfigState::default(),
            Arc::new(MemorySessionStore::new()),
            Arc::new(MemoryCatalog::new()),
            Arc::new(MemorySaleRecorder::new()),
        )
    }
}
