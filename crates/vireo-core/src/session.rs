//! # Session Module
//!
//! The acting principal: who is signed in, what role they hold, and the
//! permission record attached to them.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Lifecycle                                  │
//! │                                                                         │
//! │  Auth collaborator ──► SessionUser::decode ──► SessionState (register) │
//! │       (login)            (boundary, tolerant)      (holds Option)      │
//! │                                                        │                │
//! │  UI gating ◄── has_permission / has_section_access ◄───┘                │
//! │                                                                         │
//! │  Logout / session clear ──► SessionState drops the user                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The One Admin Override
//! `SessionUser::has_permission` is the only place in the codebase that
//! special-cases the admin role. Callers must never re-check the role
//! themselves; doing so is how inconsistent gating creeps in.

use crate::access::{Action, Role, Section, UserPermissions};
use crate::validation::validate_username;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

// =============================================================================
// Session User
// =============================================================================

/// A signed-in user, as held in the session for the life of the app window.
///
/// ## Example
/// ```rust
/// use vireo_core::access::{Action, Role, Section, UserPermissions};
/// use vireo_core::session::SessionUser;
///
/// let admin = SessionUser {
///     id: 1,
///     username: "boss".into(),
///     full_name: "The Boss".into(),
///     role: Role::Admin,
///     permissions: UserPermissions::none(),
///     phone_number: None,
///     email: None,
/// };
///
/// // Admin bypasses the (empty) record, even for unstored sections
/// assert!(admin.has_permission(Section::AdminPanel, Action::Delete));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub permissions: UserPermissions,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

impl SessionUser {
    /// Whether this user may perform `action` in `section`.
    ///
    /// ## Rules
    /// - `admin` is always allowed, for every section and action,
    ///   regardless of the permission record. This is the single
    ///   admin short-circuit in the system.
    /// - Every other role is answered strictly by the record. No role
    ///   gets broader defaults, not even `manager` or `hr`.
    pub fn has_permission(&self, section: Section, action: Action) -> bool {
        if self.role.is_admin() {
            return true;
        }
        self.permissions.allows(section, action)
    }

    /// Whether `section` should appear for this user at all.
    ///
    /// Visibility is the `view` flag, so this is `has_permission` with
    /// `Action::View`. Kept as its own method because callers gating a
    /// whole screen shouldn't have to know that convention.
    pub fn has_section_access(&self, section: Section) -> bool {
        self.has_permission(section, Action::View)
    }

    /// Sections this user can see, in sidebar order.
    pub fn accessible_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| self.has_section_access(*section))
            .collect()
    }

    /// Decodes a session user from an untrusted payload.
    ///
    /// Accepts either a JSON object or a JSON string containing one
    /// (session storage hands back strings).
    ///
    /// ## Behavior
    /// The identity fields are load-bearing and strict: a payload with a
    /// missing or malformed `id`, `username`, or `role` yields `None`,
    /// which callers treat as signed out. Everything else degrades:
    /// - `fullName` missing        → falls back to the username
    /// - `permissions` missing or
    ///   malformed                 → decoded per-flag, granting nothing
    /// - `phoneNumber` / `email`   → simply absent
    pub fn decode(payload: &Value) -> Option<SessionUser> {
        let parsed;
        let object = match payload {
            Value::String(raw) => {
                parsed = serde_json::from_str::<Value>(raw).ok()?;
                &parsed
            }
            other => other,
        };

        let id = object.get("id").and_then(Value::as_i64)?;
        let username = object
            .get("username")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| validate_username(name).is_ok())?
            .to_string();
        let role: Role =
            serde_json::from_value(object.get("role").cloned().unwrap_or(Value::Null)).ok()?;

        let full_name = object
            .get("fullName")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&username)
            .to_string();
        let permissions =
            UserPermissions::decode(object.get("permissions").unwrap_or(&Value::Null));
        let field = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(|value| value.to_string())
        };

        Some(SessionUser {
            id,
            username,
            full_name,
            role,
            permissions,
            phone_number: field("phoneNumber"),
            email: field("email"),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
