//! # In-Memory Gateways
//!
//! Gateway implementations backed by plain memory. They serve two jobs:
//! dev builds that run without a backend, and tests that need to script
//! collaborator behavior (most importantly, a sale recorder that fails
//! on demand to prove the cart survives a failed checkout).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use vireo_core::{Order, ProductSnapshot};

use super::{GatewayError, GatewayResult, ProductCatalog, SaleRecorder, SessionStore};

// =============================================================================
// Memory Session Store
// =============================================================================

/// Session store holding one payload slot in memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemorySessionStore::default()
    }

    /// Creates a store pre-loaded with a payload, for restore tests.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        MemorySessionStore {
            slot: Mutex::new(Some(payload.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().expect("Session slot mutex poisoned").clone()
    }

    fn store(&self, payload: &str) {
        *self.slot.lock().expect("Session slot mutex poisoned") = Some(payload.to_string());
    }

    fn clear(&self) {
        *self.slot.lock().expect("Session slot mutex poisoned") = None;
    }
}

// =============================================================================
// Memory Catalog
// =============================================================================

/// Product catalog backed by a HashMap.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: Mutex<HashMap<i64, ProductSnapshot>>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        MemoryCatalog::default()
    }

    /// Creates a catalog seeded with the given products.
    pub fn with_products(products: impl IntoIterator<Item = ProductSnapshot>) -> Self {
        let catalog = MemoryCatalog::new();
        for product in products {
            catalog.insert(product);
        }
        catalog
    }

    /// Adds or replaces a product.
    pub fn insert(&self, product: ProductSnapshot) {
        self.products
            .lock()
            .expect("Catalog mutex poisoned")
            .insert(product.product_id, product);
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
    async fn lookup(&self, product_id: i64) -> GatewayResult<Option<ProductSnapshot>> {
        Ok(self
            .products
            .lock()
            .expect("Catalog mutex poisoned")
            .get(&product_id)
            .cloned())
    }
}

// =============================================================================
// Memory Sale Recorder
// =============================================================================

/// Sale recorder that keeps recorded orders in memory.
///
/// ## Scripted Failure
/// `fail_next` arms a one-shot failure: the next `record` call returns it
/// and leaves the order unrecorded, after which the recorder behaves
/// normally again. This is how tests simulate a flaky backend.
#[derive(Debug, Default)]
pub struct MemorySaleRecorder {
    orders: Mutex<Vec<Order>>,
    next_failure: Mutex<Option<GatewayError>>,
}

impl MemorySaleRecorder {
    /// Creates a recorder that accepts everything.
    pub fn new() -> Self {
        MemorySaleRecorder::default()
    }

    /// Arms a failure for the next `record` call only.
    pub fn fail_next(&self, error: GatewayError) {
        *self.next_failure.lock().expect("Recorder mutex poisoned") = Some(error);
    }

    /// Returns all successfully recorded orders.
    pub fn recorded(&self) -> Vec<Order> {
        self.orders.lock().expect("Recorder mutex poisoned").clone()
    }

    /// Returns how many orders were recorded.
    pub fn record_count(&self) -> usize {
        self.orders.lock().expect("Recorder mutex poisoned").len()
    }
}

#[async_trait]
impl SaleRecorder for MemorySaleRecorder {
    async fn record(&self, order: &Order) -> GatewayResult<()> {
        if let Some(error) = self
            .next_failure
            .lock()
            .expect("Recorder mutex poisoned")
            .take()
        {
            return Err(error);
        }
        self.orders
            .lock()
            .expect("Recorder mutex poisoned")
            .push(order.clone());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vireo_core::{Money, PaymentMethod};

    fn test_order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            lines: Vec::new(),
            total_cents: 500,
            payment_method: PaymentMethod::Cash,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_session_store_round_trip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load(), None);

        store.store("{\"id\":1}");
        assert_eq!(store.load().as_deref(), Some("{\"id\":1}"));

        store.clear();
        assert_eq!(store.load(), None);
    }

    #[tokio::test]
    async fn test_catalog_lookup() {
        let cola = ProductSnapshot::new(1, "Cola", Money::from_cents(299)).unwrap();
        let catalog = MemoryCatalog::with_products([cola.clone()]);

        assert_eq!(catalog.lookup(1).await.unwrap(), Some(cola));
        assert_eq!(catalog.lookup(404).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_recorder_accepts_orders() {
        let recorder = MemorySaleRecorder::new();
        recorder.record(&test_order("a")).await.unwrap();
        recorder.record(&test_order("b")).await.unwrap();

        assert_eq!(recorder.record_count(), 2);
        assert_eq!(recorder.recorded()[0].id, "a");
    }

    #[tokio::test]
    async fn test_recorder_scripted_failure_is_one_shot() {
        let recorder = MemorySaleRecorder::new();
        recorder.fail_next(GatewayError::unavailable("backend down"));

        let err = recorder.record(&test_order("a")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Unavailable(_)));
        assert_eq!(recorder.record_count(), 0, "failed order must not be kept");

        // Next attempt goes through
        recorder.record(&test_order("a")).await.unwrap();
        assert_eq!(recorder.record_count(), 1);
    }
}
