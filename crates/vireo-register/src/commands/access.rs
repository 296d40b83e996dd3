//! # Access Commands
//!
//! Permission queries the shell uses to decide what to render. These
//! return booleans and lists, never errors: an unanswerable question is
//! answered "no" (fail closed), and the shell simply doesn't draw the
//! button.
//!
//! ## Render Gating
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Render Gating                                        │
//! │                                                                         │
//! │  Sidebar             visible_sections() ──► [pos, customers]           │
//! │                                                                         │
//! │  Screen toolbar      allowed_actions(pos) ──► { view: true,            │
//! │                                                 create: true,          │
//! │                                                 edit: false,           │
//! │                                                 delete: false }        │
//! │                                                                         │
//! │  Route guard         can_access(inventory) ──► false ──► redirect      │
//! │                                                                         │
//! │  Admin user form     permission_form_fields() ──► which checkboxes     │
//! │                      exist per section (sales/refill are view-only)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use vireo_core::access::{Action, Section};

use crate::state::SessionState;

/// Resolved action flags for one section, ready to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionActionsView {
    pub section: Section,
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

/// Which permission checkboxes the admin user form shows for a section.
///
/// A UI input constraint only: the data model itself accepts any flag
/// combination for any stored section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionFormField {
    pub section: Section,
    pub editable: Vec<Action>,
}

/// Whether the current principal can see a section at all.
pub fn can_access(session: &SessionState, section: Section) -> bool {
    session.has_section_access(section)
}

/// Resolved flags for a section. For admins every flag is `true`.
pub fn allowed_actions(session: &SessionState, section: Section) -> SectionActionsView {
    debug!(section = section.as_str(), "allowed_actions command");
    SectionActionsView {
        section,
        view: session.has_permission(section, Action::View),
        create: session.has_permission(section, Action::Create),
        edit: session.has_permission(section, Action::Edit),
        delete: session.has_permission(section, Action::Delete),
    }
}

/// Sections the sidebar should draw, in sidebar order. Empty when
/// signed out.
pub fn visible_sections(session: &SessionState) -> Vec<Section> {
    session
        .with_user(|user| user.accessible_sections())
        .unwrap_or_default()
}

/// Static metadata for the admin permission form: which flags each
/// stored section exposes. `sales` and `refill` are view-only in the
/// form; the other sections expose all four flags.
pub fn permission_form_fields() -> Vec<PermissionFormField> {
    const ALL_ACTIONS: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];

    [
        Section::Pos,
        Section::Inventory,
        Section::Sales,
        Section::Refill,
        Section::Customers,
        Section::Suppliers,
    ]
    .into_iter()
    .map(|section| {
        let editable = match section {
            Section::Sales | Section::Refill => vec![Action::View],
            _ => ALL_ACTIONS.to_vec(),
        };
        PermissionFormField { section, editable }
    })
    .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vireo_core::access::{Role, SectionPermissions, UserPermissions};
    use vireo_core::SessionUser;

    fn signed_in(role: Role, permissions: UserPermissions) -> SessionState {
        let session = SessionState::new();
        session.sign_in(SessionUser {
            id: 1,
            username: "tester".into(),
            full_name: "Test User".into(),
            role,
            permissions,
            phone_number: None,
            email: None,
        });
        session
    }

    #[test]
    fn test_admin_gets_everything() {
        let session = signed_in(Role::Admin, UserPermissions::none());

        assert_eq!(visible_sections(&session).len(), 8);
        let actions = allowed_actions(&session, Section::AdminPanel);
        assert!(actions.view && actions.create && actions.edit && actions.delete);
    }

    #[test]
    fn test_cashier_sees_only_granted() {
        let mut permissions = UserPermissions::none();
        permissions.pos = SectionPermissions {
            view: true,
            create: true,
            ..SectionPermissions::NONE
        };
        let session = signed_in(Role::Cashier, permissions);

        assert_eq!(visible_sections(&session), vec![Section::Pos]);
        assert!(can_access(&session, Section::Pos));
        assert!(!can_access(&session, Section::Sales));

        let actions = allowed_actions(&session, Section::Pos);
        assert!(actions.view && actions.create);
        assert!(!actions.edit && !actions.delete);
    }

    #[test]
    fn test_signed_out_sees_nothing() {
        let session = SessionState::new();
        assert!(visible_sections(&session).is_empty());
        assert!(!can_access(&session, Section::Pos));
        let actions = allowed_actions(&session, Section::Pos);
        assert!(!actions.view && !actions.create && !actions.edit && !actions.delete);
    }

    #[test]
    fn test_form_fields_sales_refill_view_only() {
        let fields = permission_form_fields();
        assert_eq!(fields.len(), 6, "only stored sections appear in the form");

        for field in &fields {
            match field.section {
                Section::Sales | Section::Refill => {
                    assert_eq!(field.editable, vec![Action::View]);
                }
                Section::ActivityLogs | Section::AdminPanel => {
                    panic!("unstored sections must not appear in the form");
                }
                _ => assert_eq!(field.editable.len(), 4),
            }
        }
    }
}
