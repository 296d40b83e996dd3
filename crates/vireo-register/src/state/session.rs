//! # Session State
//!
//! Holds the signed-in user for the life of the app window.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Lifecycle                              │
//! │                                                                         │
//! │  sign_in command ─────► SessionState::sign_in ────► Some(user)         │
//! │                                                                         │
//! │  every gate check ────► has_permission / ─────────► bool               │
//! │  (sidebar, buttons)     has_section_access          (false if empty)   │
//! │                                                                         │
//! │  sign_out command ────► SessionState::sign_out ───► None               │
//! │                                                                         │
//! │  There is no ambient global. Whoever needs the principal holds a       │
//! │  reference to this state and asks it explicitly.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Uses `Arc<RwLock<T>>` rather than a Mutex: permission checks happen on
//! every render pass while writes happen twice per session (sign-in,
//! sign-out), so concurrent readers are the common case.

use std::sync::{Arc, RwLock};

use vireo_core::access::{Action, Section};
use vireo_core::SessionUser;

/// Managed session state.
///
/// Cloning is cheap and shares the same underlying slot.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    user: Arc<RwLock<Option<SessionUser>>>,
}

impl SessionState {
    /// Creates a signed-out session state.
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Installs a user as the active principal.
    pub fn sign_in(&self, user: SessionUser) {
        *self.user.write().expect("Session lock poisoned") = Some(user);
    }

    /// Clears the active principal.
    pub fn sign_out(&self) {
        *self.user.write().expect("Session lock poisoned") = None;
    }

    /// Whether anyone is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.user.read().expect("Session lock poisoned").is_some()
    }

    /// Returns a copy of the current user, if any.
    pub fn current(&self) -> Option<SessionUser> {
        self.user.read().expect("Session lock poisoned").clone()
    }

    /// Executes a function with read access to the signed-in user.
    ///
    /// Returns `None` when signed out.
    pub fn with_user<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&SessionUser) -> R,
    {
        self.user
            .read()
            .expect("Session lock poisoned")
            .as_ref()
            .map(f)
    }

    /// Whether the current principal may perform `action` in `section`.
    ///
    /// ## Behavior
    /// Signed out ⇒ `false`. Never an error, never a panic; the caller
    /// decides whether "no" means hide a button or refuse a command.
    pub fn has_permission(&self, section: Section, action: Action) -> bool {
        self.with_user(|user| user.has_permission(section, action))
            .unwrap_or(false)
    }

    /// Whether `section` is visible to the current principal.
    ///
    /// Signed out ⇒ `false`.
    pub fn has_section_access(&self, section: Section) -> bool {
        self.with_user(|user| user.has_section_access(section))
            .unwrap_or(false)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
