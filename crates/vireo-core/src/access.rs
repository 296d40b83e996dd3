//! # Access Control Module
//!
//! Role and permission types for gating what a signed-in user can see and do.
//!
//! ## Permission Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Permission Matrix                                  │
//! │                                                                         │
//! │              │ view │ create │ edit │ delete │                          │
//! │  ────────────┼──────┼────────┼──────┼────────┤                          │
//! │  pos         │  ✓   │   ✓    │  ✗   │   ✗    │  ← one row per section  │
//! │  inventory   │  ✓   │   ✗    │  ✗   │   ✗    │                          │
//! │  sales       │  ✗   │   ✗    │  ✗   │   ✗    │                          │
//! │  refill      │  ..  │   ..   │  ..  │   ..   │                          │
//! │  customers   │  ..  │   ..   │  ..  │   ..   │                          │
//! │  suppliers   │  ..  │   ..   │  ..  │   ..   │                          │
//! │                                                                         │
//! │  activity_logs, admin_panel: NO row exists. They are reachable         │
//! │  only through the admin override in SessionUser::has_permission.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fail-Closed Rule
//! Every lookup that cannot produce a positive answer produces `false`:
//! missing section, missing flag, wrong JSON type, unparseable payload.
//! Degradation is per-flag, so one corrupt value never takes down the
//! rest of a user's grants.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

// =============================================================================
// Role
// =============================================================================

/// User roles in the system.
///
/// ## Behavior
/// Roles do NOT imply permissions by themselves. With one exception
/// (admin, see `SessionUser::has_permission`), access always comes from
/// the stored permission record. A manager with an empty record can do
/// nothing a permissionless cashier can't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Admin,
    Cashier,
    Manager,
    Hr,
}

impl Role {
    /// Returns the role as a lowercase string (matches serialization).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Cashier => "cashier",
            Role::Manager => "manager",
            Role::Hr => "hr",
        }
    }

    /// Whether this role bypasses the permission record entirely.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

// =============================================================================
// Section
// =============================================================================

/// Application sections that can be gated.
///
/// Six sections carry a row in the permission record. `ActivityLogs` and
/// `AdminPanel` deliberately do not: no record can grant them, so only
/// the admin override reaches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Section {
    Pos,
    Inventory,
    Sales,
    Refill,
    Customers,
    Suppliers,
    ActivityLogs,
    AdminPanel,
}

impl Section {
    /// All sections, in sidebar order.
    pub const ALL: [Section; 8] = [
        Section::Pos,
        Section::Inventory,
        Section::Sales,
        Section::Refill,
        Section::Customers,
        Section::Suppliers,
        Section::ActivityLogs,
        Section::AdminPanel,
    ];

    /// Returns the section key as used in permission payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Pos => "pos",
            Section::Inventory => "inventory",
            Section::Sales => "sales",
            Section::Refill => "refill",
            Section::Customers => "customers",
            Section::Suppliers => "suppliers",
            Section::ActivityLogs => "activity_logs",
            Section::AdminPanel => "admin_panel",
        }
    }
}

// =============================================================================
// Action
// =============================================================================

/// The four actions a permission row can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    /// Returns the flag key as used in permission payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }
}

// =============================================================================
// Section Permissions
// =============================================================================

/// One row of the permission matrix: the four flags for a single section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SectionPermissions {
    #[serde(default)]
    pub view: bool,
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub edit: bool,
    #[serde(default)]
    pub delete: bool,
}

impl SectionPermissions {
    /// No flags granted. The value every absent section degrades to.
    pub const NONE: SectionPermissions = SectionPermissions {
        view: false,
        create: false,
        edit: false,
        delete: false,
    };

    /// All four flags granted.
    pub const FULL: SectionPermissions = SectionPermissions {
        view: true,
        create: true,
        edit: true,
        delete: true,
    };

    /// Whether this row grants the given action.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
        }
    }

    /// Decodes one row from an untrusted JSON value.
    ///
    /// Each flag is read independently. A flag that is missing or is not
    /// a JSON boolean becomes `false` without affecting its siblings.
    fn decode(value: &Value) -> SectionPermissions {
        let flag = |key: &str| value.get(key).and_then(Value::as_bool).unwrap_or(false);
        SectionPermissions {
            view: flag("view"),
            create: flag("create"),
            edit: flag("edit"),
            delete: flag("delete"),
        }
    }
}

// =============================================================================
// User Permissions
// =============================================================================

/// The full permission record for one user: six stored sections.
///
/// ## Why a struct and not a map?
/// The section set is closed. A struct makes "which sections exist" a
/// compile-time fact, and unknown keys in a payload simply have nowhere
/// to land (they are ignored, matching the fail-closed rule).
///
/// ## Example
/// ```rust
/// use vireo_core::access::{Action, Section, SectionPermissions, UserPermissions};
///
/// let mut perms = UserPermissions::none();
/// perms.pos = SectionPermissions { view: true, create: true, ..SectionPermissions::NONE };
///
/// assert!(perms.allows(Section::Pos, Action::View));
/// assert!(!perms.allows(Section::Pos, Action::Delete));
/// assert!(!perms.allows(Section::Inventory, Action::View));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserPermissions {
    #[serde(default)]
    pub pos: SectionPermissions,
    #[serde(default)]
    pub inventory: SectionPermissions,
    #[serde(default)]
    pub sales: SectionPermissions,
    #[serde(default)]
    pub refill: SectionPermissions,
    #[serde(default)]
    pub customers: SectionPermissions,
    #[serde(default)]
    pub suppliers: SectionPermissions,
}

impl UserPermissions {
    /// A record that grants nothing.
    pub fn none() -> Self {
        UserPermissions::default()
    }

    /// A record that grants everything storable. Used for seeding and tests.
    ///
    /// Note this still does not reach `ActivityLogs` or `AdminPanel`:
    /// those have no row to fill.
    pub fn full() -> Self {
        UserPermissions {
            pos: SectionPermissions::FULL,
            inventory: SectionPermissions::FULL,
            sales: SectionPermissions::FULL,
            refill: SectionPermissions::FULL,
            customers: SectionPermissions::FULL,
            suppliers: SectionPermissions::FULL,
        }
    }

    /// Returns the row for a section, or `None` for the two sections that
    /// are never stored (`ActivityLogs`, `AdminPanel`).
    pub fn section(&self, section: Section) -> Option<&SectionPermissions> {
        match section {
            Section::Pos => Some(&self.pos),
            Section::Inventory => Some(&self.inventory),
            Section::Sales => Some(&self.sales),
            Section::Refill => Some(&self.refill),
            Section::Customers => Some(&self.customers),
            Section::Suppliers => Some(&self.suppliers),
            Section::ActivityLogs | Section::AdminPanel => None,
        }
    }

    /// Whether this record grants an action in a section.
    ///
    /// ## Behavior
    /// - Sections without a row (activity logs, admin panel): always `false`
    /// - This is the record-only answer. Role overrides live one level up,
    ///   in `SessionUser::has_permission`.
    pub fn allows(&self, section: Section, action: Action) -> bool {
        self.section(section)
            .map(|row| row.allows(action))
            .unwrap_or(false)
    }

    /// Decodes a permission record from an untrusted payload.
    ///
    /// ## Behavior
    /// The payload is whatever the backend attached to the user: usually a
    /// JSON object, sometimes that same object serialized into a JSON
    /// string (double encoding is common in the wild). Both are accepted.
    ///
    /// Decoding never fails. The degradation ladder:
    /// - string payload that isn't valid JSON  → grants nothing
    /// - payload that isn't an object          → grants nothing
    /// - section missing or not an object      → that section grants nothing
    /// - flag missing or not a boolean         → that flag is `false`
    ///
    /// ## Example
    /// ```rust
    /// use vireo_core::access::{Action, Section, UserPermissions};
    /// use serde_json::json;
    ///
    /// let payload = json!({ "pos": { "view": true, "create": "yes" } });
    /// let perms = UserPermissions::decode(&payload);
    ///
    /// assert!(perms.allows(Section::Pos, Action::View));
    /// // "yes" is not a boolean, so the flag degrades to false
    /// assert!(!perms.allows(Section::Pos, Action::Create));
    /// ```
    pub fn decode(payload: &Value) -> UserPermissions {
        // Unwrap one level of string encoding if present.
        let parsed;
        let object = match payload {
            Value::String(raw) => {
                parsed = serde_json::from_str::<Value>(raw).unwrap_or(Value::Null);
                &parsed
            }
            other => other,
        };

        let row = |key: &str| {
            object
                .get(key)
                .map(SectionPermissions::decode)
                .unwrap_or(SectionPermissions::NONE)
        };

        UserPermissions {
            pos: row("pos"),
            inventory: row("inventory"),
            sales: row("sales"),
            refill: row("refill"),
            customers: row("customers"),
            suppliers: row("suppliers"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"cashier\"").unwrap();
        assert_eq!(role, Role::Cashier);
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
    }

    #[test]
    fn test_section_keys() {
        assert_eq!(Section::Pos.as_str(), "pos");
        assert_eq!(Section::ActivityLogs.as_str(), "activity_logs");
        assert_eq!(Section::ALL.len(), 8);
    }

    #[test]
    fn test_section_permissions_allows() {
        let row = SectionPermissions {
            view: true,
            create: false,
            edit: true,
            delete: false,
        };
        assert!(row.allows(Action::View));
        assert!(!row.allows(Action::Create));
        assert!(row.allows(Action::Edit));
        assert!(!row.allows(Action::Delete));
    }

    #[test]
    fn test_decode_full_object() {
        let payload = json!({
            "pos": { "view": true, "create": true, "edit": false, "delete": false },
            "inventory": { "view": true, "create": false, "edit": false, "delete": false }
        });
        let perms = UserPermissions::decode(&payload);

        assert!(perms.allows(Section::Pos, Action::View));
        assert!(perms.allows(Section::Pos, Action::Create));
        assert!(!perms.allows(Section::Pos, Action::Edit));
        assert!(perms.allows(Section::Inventory, Action::View));
        // Sections absent from the payload grant nothing
        assert_eq!(perms.sales, SectionPermissions::NONE);
        assert!(!perms.allows(Section::Sales, Action::View));
    }

    #[test]
    fn test_decode_string_payload() {
        // Double-encoded: a JSON string containing JSON
        let payload = json!("{\"pos\": {\"view\": true}}");
        let perms = UserPermissions::decode(&payload);
        assert!(perms.allows(Section::Pos, Action::View));
        assert!(!perms.allows(Section::Pos, Action::Create));
    }

    #[test]
    fn test_decode_malformed_flag_degrades_alone() {
        let payload = json!({
            "pos": { "view": "yes", "create": true, "edit": 1, "delete": null }
        });
        let perms = UserPermissions::decode(&payload);
        // Only the well-typed flag survives
        assert!(!perms.pos.view);
        assert!(perms.pos.create);
        assert!(!perms.pos.edit);
        assert!(!perms.pos.delete);
    }

    #[test]
    fn test_decode_garbage_grants_nothing() {
        for payload in [
            json!("not json at all"),
            json!(null),
            json!(42),
            json!(["pos"]),
        ] {
            let perms = UserPermissions::decode(&payload);
            assert_eq!(perms, UserPermissions::none(), "payload: {payload}");
        }
    }

    #[test]
    fn test_decode_ignores_unknown_sections() {
        let payload = json!({
            "pos": { "view": true },
            "warehouse": { "view": true, "create": true }
        });
        let perms = UserPermissions::decode(&payload);
        assert!(perms.allows(Section::Pos, Action::View));
        assert_eq!(perms.inventory, SectionPermissions::NONE);
    }

    #[test]
    fn test_unstored_sections_never_granted_by_record() {
        let perms = UserPermissions::full();
        assert!(perms.allows(Section::Pos, Action::Delete));
        assert!(!perms.allows(Section::ActivityLogs, Action::View));
        assert!(!perms.allows(Section::AdminPanel, Action::View));
        assert!(perms.section(Section::AdminPanel).is_none());
    }
}
