//! # Cart Commands
//!
//! The live sale surface: every mutation returns the refreshed
//! [`CartView`] so the shell can re-render the ticket from one payload
//! instead of diffing events.
//!
//! All cart mutations gate on `pos`/`create`. Reading the cart gates on
//! `pos`/`view` only, so a view-only user can watch a sale without
//! being able to change it.

use tracing::debug;

use crate::error::ApiError;
use crate::gateway::ProductCatalog;
use crate::state::{CartState, CartView, SessionState};
use vireo_core::access::{Action, Section};

use super::require;

/// Current cart contents and totals.
pub fn get_cart(session: &SessionState, cart: &CartState) -> Result<CartView, ApiError> {
    require(session, Section::Pos, Action::View)?;
    Ok(cart.with_cart(|c| CartView::from(c)))
}

/// Looks up a product and adds one unit of it to the cart.
///
/// Adding the same product again bumps its quantity; the name and
/// price captured on first add stay as they were, so the ticket cannot
/// reprice mid-sale.
pub async fn add_to_cart(
    session: &SessionState,
    catalog: &dyn ProductCatalog,
    cart: &CartState,
    product_id: i64,
) -> Result<CartView, ApiError> {
    require(session, Section::Pos, Action::Create)?;
    debug!(product_id, "add_to_cart command");

    let snapshot = catalog
        .lookup(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    Ok(cart.with_cart_mut(|c| {
        c.add_item(snapshot);
        CartView::from(&*c)
    }))
}

/// Adjusts a line's quantity by `delta` (positive or negative).
///
/// Quantity floors at 1; dropping a line is an explicit
/// [`remove_from_cart`], never a decrement side effect. Unknown ids are
/// ignored.
pub fn update_cart_quantity(
    session: &SessionState,
    cart: &CartState,
    product_id: i64,
    delta: i64,
) -> Result<CartView, ApiError> {
    require(session, Section::Pos, Action::Create)?;
    debug!(product_id, delta, "update_cart_quantity command");

    Ok(cart.with_cart_mut(|c| {
        c.update_quantity(product_id, delta);
        CartView::from(&*c)
    }))
}

/// Removes a line entirely. Unknown ids are ignored.
pub fn remove_from_cart(
    session: &SessionState,
    cart: &CartState,
    product_id: i64,
) -> Result<CartView, ApiError> {
    require(session, Section::Pos, Action::Create)?;
    debug!(product_id, "remove_from_cart command");

    Ok(cart.with_cart_mut(|c| {
        c.remove_item(product_id);
        CartView::from(&*c)
    }))
}

/// Voids the sale in progress.
pub fn clear_cart(session: &SessionState, cart: &CartState) -> Result<CartView, ApiError> {
    require(session, Section::Pos, Action::Create)?;
    debug!("clear_cart command");

    Ok(cart.with_cart_mut(|c| {
        c.clear();
        CartView::from(&*c)
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::gateway::MemoryCatalog;
    use vireo_core::access::{Role, SectionPermissions, UserPermissions};
    use vireo_core::{Money, ProductSnapshot, SessionUser};

    fn admin_session() -> SessionState {
        let session = SessionState::new();
        session.sign_in(SessionUser {
            id: 1,
            username: "admin".into(),
            full_name: "Admin".into(),
            role: Role::Admin,
            permissions: UserPermissions::none(),
            phone_number: None,
            email: None,
        });
        session
    }

    fn view_only_session() -> SessionState {
        let mut permissions = UserPermissions::none();
        permissions.pos = SectionPermissions {
            view: true,
            ..SectionPermissions::NONE
        };
        let session = SessionState::new();
        session.sign_in(SessionUser {
            id: 2,
            username: "watcher".into(),
            full_name: "Watcher".into(),
            role: Role::Cashier,
            permissions,
            phone_number: None,
            email: None,
        });
        session
    }

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::with_products(vec![
            ProductSnapshot::new(101, "Coffee Beans 1kg", Money::from_cents(1499)).unwrap(),
            ProductSnapshot::new(102, "Filter Papers", Money::from_cents(299)).unwrap(),
        ])
    }

    #[tokio::test]
    async fn test_add_to_cart_builds_view() {
        let session = admin_session();
        let catalog = catalog();
        let cart = CartState::new();

        let view = add_to_cart(&session, &catalog, &cart, 101).await.unwrap();
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.totals.total_cents, 1499);

        let view = add_to_cart(&session, &catalog, &cart, 101).await.unwrap();
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].quantity, 2);
        assert_eq!(view.totals.total_cents, 2998);
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_not_found() {
        let session = admin_session();
        let catalog = catalog();
        let cart = CartState::new();

        let err = add_to_cart(&session, &catalog, &cart, 999).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(cart.with_cart(|c| c.is_empty()));
    }

    #[tokio::test]
    async fn test_view_only_user_can_read_but_not_mutate() {
        let session = view_only_session();
        let catalog = catalog();
        let cart = CartState::new();

        assert!(get_cart(&session, &cart).is_ok());

        let err = add_to_cart(&session, &catalog, &cart, 101).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err = clear_cart(&session, &cart).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_signed_out_is_unauthorized() {
        let session = SessionState::new();
        let cart = CartState::new();

        let err = get_cart(&session, &cart).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_quantity_and_removal_flow() {
        let session = admin_session();
        let cart = CartState::new();
        cart.with_cart_mut(|c| {
            c.add_item(ProductSnapshot::new(101, "Coffee Beans 1kg", Money::from_cents(1499)).unwrap());
        });

        let view = update_cart_quantity(&session, &cart, 101, 3).unwrap();
        assert_eq!(view.lines[0].quantity, 4);

        // Floors at 1 rather than deleting the line.
        let view = update_cart_quantity(&session, &cart, 101, -10).unwrap();
        assert_eq!(view.lines[0].quantity, 1);

        // Unknown id leaves the cart alone.
        let view = update_cart_quantity(&session, &cart, 555, 2).unwrap();
        assert_eq!(view.lines.len(), 1);

        let view = remove_from_cart(&session, &cart, 101).unwrap();
        assert!(view.lines.is_empty());
        assert_eq!(view.totals.total_cents, 0);
    }
}
