//! # Fallback Store
//!
//! The `{primary, fallback}` policy object wrapping both backends.
//!
//! ## Per-Call Fallback
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Fallback Decision, Per Operation                     │
//! │                                                                         │
//! │  caller ──► Store::save_product(p)                                     │
//! │                   │                                                     │
//! │                   ├── primary configured?                              │
//! │                   │      │                                              │
//! │                   │      ├── YES ──► remote.save_product(p)            │
//! │                   │      │             │                                │
//! │                   │      │             ├── Ok  ──► flag := false, done │
//! │                   │      │             │                                │
//! │                   │      │             └── Err ──► warn!, flag := true │
//! │                   │      │                         fall through ▼      │
//! │                   │      └── NO ─────────────────────────────────┐     │
//! │                   │                                              ▼     │
//! │                   └────────────────────────► local.save_product(p)     │
//! │                                                                         │
//! │  The caller observes the LOCAL result when the remote path failed.     │
//! │  Transient remote unavailability never surfaces as an error.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What the fallback is NOT
//!
//! It is not transactional and not reconciled later. If the remote backend
//! recovers, data written during a fallback window remains only in local
//! storage. The flag exposed by [`Store::is_using_fallback`] drives an
//! advisory banner and must never gate correctness.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tracing::warn;

use omtraders_core::{Category, Invoice, InvoiceStatus, Product};

use crate::backend::{LocalBackend, RemoteBackend, StorageBackend};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Store
// =============================================================================

/// Storage front door: remote-first with transparent local fallback.
///
/// Generic over both backends so tests can wire in whatever they need;
/// production code uses the [`RetailStore`] alias.
#[derive(Debug)]
pub struct Store<R, L> {
    primary: Option<R>,
    fallback: L,
    /// Whether the last operation was served by the fallback path.
    using_fallback: AtomicBool,
}

/// The production store: remote Data API over a local JSON area.
pub type RetailStore = Store<RemoteBackend, LocalBackend>;

impl RetailStore {
    /// Builds the production store from configuration.
    ///
    /// A missing remote configuration means the fallback path is active
    /// from the very first call.
    pub fn from_config(config: &StoreConfig) -> Self {
        Store::new(
            config.remote.clone().map(RemoteBackend::new),
            LocalBackend::new(&config.data_dir),
        )
    }
}

impl<R, L> Store<R, L>
where
    R: StorageBackend,
    L: StorageBackend,
{
    /// Creates a store from an optional primary and a fallback backend.
    pub fn new(primary: Option<R>, fallback: L) -> Self {
        let local_only = primary.is_none();
        Store {
            primary,
            fallback,
            using_fallback: AtomicBool::new(local_only),
        }
    }

    /// Whether the local-persistence path is currently active.
    ///
    /// Advisory only (the UI shows a "using local storage" banner);
    /// correctness never depends on this flag.
    pub fn is_using_fallback(&self) -> bool {
        self.using_fallback.load(Ordering::Relaxed)
    }

    fn note_primary_ok(&self) {
        self.using_fallback.store(false, Ordering::Relaxed);
    }

    fn note_primary_failed(&self, operation: &str, err: &StoreError) {
        warn!(
            operation = %operation,
            error = %err,
            "Remote backend failed, retrying against local persistence"
        );
        self.using_fallback.store(true, Ordering::Relaxed);
    }
}

// The contract is one conditional branch repeated per operation: try the
// primary when configured, note the outcome, otherwise serve locally.
impl<R, L> StorageBackend for Store<R, L>
where
    R: StorageBackend,
    L: StorageBackend,
{
    async fn get_products(&self) -> StoreResult<Vec<Product>> {
        if let Some(primary) = &self.primary {
            match primary.get_products().await {
                Ok(products) => {
                    self.note_primary_ok();
                    return Ok(products);
                }
                Err(err) => self.note_primary_failed("get_products", &err),
            }
        }
        self.fallback.get_products().await
    }

    async fn save_product(&self, product: &Product) -> StoreResult<()> {
        // The upsert contract stamps updatedAt on every save, so both
        // backends persist identical documents
        let mut doc = product.clone();
        doc.updated_at = Utc::now();

        if let Some(primary) = &self.primary {
            match primary.save_product(&doc).await {
                Ok(()) => {
                    self.note_primary_ok();
                    return Ok(());
                }
                Err(err) => self.note_primary_failed("save_product", &err),
            }
        }
        self.fallback.save_product(&doc).await
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        if let Some(primary) = &self.primary {
            match primary.delete_product(id).await {
                Ok(()) => {
                    self.note_primary_ok();
                    return Ok(());
                }
                Err(err) => self.note_primary_failed("delete_product", &err),
            }
        }
        self.fallback.delete_product(id).await
    }

    async fn get_invoices(&self) -> StoreResult<Vec<Invoice>> {
        if let Some(primary) = &self.primary {
            match primary.get_invoices().await {
                Ok(invoices) => {
                    self.note_primary_ok();
                    return Ok(invoices);
                }
                Err(err) => self.note_primary_failed("get_invoices", &err),
            }
        }
        self.fallback.get_invoices().await
    }

    async fn save_invoice(&self, invoice: &Invoice) -> StoreResult<()> {
        if let Some(primary) = &self.primary {
            match primary.save_invoice(invoice).await {
                Ok(()) => {
                    self.note_primary_ok();
                    return Ok(());
                }
                Err(err) => self.note_primary_failed("save_invoice", &err),
            }
        }
        self.fallback.save_invoice(invoice).await
    }

    async fn update_invoice_status(&self, id: &str, status: InvoiceStatus) -> StoreResult<()> {
        if let Some(primary) = &self.primary {
            match primary.update_invoice_status(id, status).await {
                Ok(()) => {
                    self.note_primary_ok();
                    return Ok(());
                }
                Err(err) => self.note_primary_failed("update_invoice_status", &err),
            }
        }
        self.fallback.update_invoice_status(id, status).await
    }

    async fn get_categories(&self) -> StoreResult<Vec<Category>> {
        if let Some(primary) = &self.primary {
            match primary.get_categories().await {
                Ok(categories) => {
                    self.note_primary_ok();
                    return Ok(categories);
                }
                Err(err) => self.note_primary_failed("get_categories", &err),
            }
        }
        self.fallback.get_categories().await
    }

    async fn save_category(&self, category: &Category) -> StoreResult<()> {
        if let Some(primary) = &self.primary {
            match primary.save_category(category).await {
                Ok(()) => {
                    self.note_primary_ok();
                    return Ok(());
                }
                Err(err) => self.note_primary_failed("save_category", &err),
            }
        }
        self.fallback.save_category(category).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use chrono::Utc;
    use omtraders_core::Money;

    /// Backend where every operation fails, standing in for an unreachable
    /// remote.
    #[derive(Debug, Clone, Default)]
    struct FailingBackend;

    fn failure() -> StoreError {
        StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "remote unreachable",
        ))
    }

    impl StorageBackend for FailingBackend {
        async fn get_products(&self) -> StoreResult<Vec<Product>> {
            Err(failure())
        }
        async fn save_product(&self, _product: &Product) -> StoreResult<()> {
            Err(failure())
        }
        async fn delete_product(&self, _id: &str) -> StoreResult<()> {
            Err(failure())
        }
        async fn get_invoices(&self) -> StoreResult<Vec<Invoice>> {
            Err(failure())
        }
        async fn save_invoice(&self, _invoice: &Invoice) -> StoreResult<()> {
            Err(failure())
        }
        async fn update_invoice_status(
            &self,
            _id: &str,
            _status: InvoiceStatus,
        ) -> StoreResult<()> {
            Err(failure())
        }
        async fn get_categories(&self) -> StoreResult<Vec<Category>> {
            Err(failure())
        }
        async fn save_category(&self, _category: &Category) -> StoreResult<()> {
            Err(failure())
        }
    }

    fn temp_local() -> LocalBackend {
        let dir = std::env::temp_dir().join(format!("omtraders-store-{}", uuid::Uuid::new_v4()));
        LocalBackend::new(dir)
    }

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: "Pipe 2in".to_string(),
            description: String::new(),
            category: "PVC".to_string(),
            dimensions: String::new(),
            image_url: String::new(),
            price: Money::from_paise(15000),
            stock: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_no_primary_serves_locally_and_reports_fallback() {
        let store: Store<FailingBackend, LocalBackend> = Store::new(None, temp_local());

        assert!(store.is_using_fallback());
        store.save_product(&product("p1")).await.unwrap();
        assert_eq!(store.get_products().await.unwrap().len(), 1);
        assert!(store.is_using_fallback());
    }

    #[tokio::test]
    async fn test_failing_primary_falls_back_per_operation() {
        let store = Store::new(Some(FailingBackend), temp_local());

        // Every operation completes against local persistence
        store.save_product(&product("p1")).await.unwrap();
        let products = store.get_products().await.unwrap();
        assert_eq!(products.len(), 1);

        store.delete_product("p1").await.unwrap();
        assert!(store.get_products().await.unwrap().is_empty());

        assert!(store.is_using_fallback());
    }

    #[tokio::test]
    async fn test_healthy_primary_clears_fallback_flag() {
        // Two local areas stand in for "remote" and "local"
        let primary = temp_local();
        let fallback = temp_local();
        let store = Store::new(Some(primary.clone()), fallback.clone());

        store.save_product(&product("p1")).await.unwrap();
        assert!(!store.is_using_fallback());

        // The write landed on the primary, not the fallback
        assert_eq!(primary.get_products().await.unwrap().len(), 1);
        assert!(fallback.get_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_product_stamps_updated_at() {
        let store: Store<FailingBackend, LocalBackend> = Store::new(None, temp_local());

        let original = product("p1");
        let first_stamp = original.updated_at;
        store.save_product(&original).await.unwrap();

        let stored = store.get_products().await.unwrap();
        assert!(stored[0].updated_at > first_stamp);

        // A second save moves the stamp strictly forward
        store.save_product(&stored[0]).await.unwrap();
        let restored = store.get_products().await.unwrap();
        assert!(restored[0].updated_at > stored[0].updated_at);
    }
}
