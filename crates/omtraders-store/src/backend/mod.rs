//! # Storage Backends
//!
//! The uniform asynchronous CRUD contract over products, invoices and
//! categories, plus both implementations.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    StorageBackend Contract                              │
//! │                                                                         │
//! │  Callers cannot tell which backend served a call. Both ends honor:     │
//! │                                                                         │
//! │  save_product     upsert by id - replace when present, insert when    │
//! │                   absent (the caller stamps updatedAt)                 │
//! │  delete_product   silent no-op when the id is absent                   │
//! │  save_invoice     upsert by id - idempotent under retry                │
//! │  update_invoice_status                                                 │
//! │                   in-place mutation, silent no-op when absent,         │
//! │                   no other fields altered                              │
//! │  get_*            full collection, order unspecified                   │
//! │                                                                         │
//! │  Implementations:                                                       │
//! │  • RemoteBackend - document-store Data API over HTTP                   │
//! │  • LocalBackend  - one JSON file per collection on disk                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use omtraders_core::{Category, Invoice, InvoiceStatus, Product};

use crate::error::StoreResult;

pub mod local;
pub mod remote;

pub use local::LocalBackend;
pub use remote::RemoteBackend;

// =============================================================================
// Collection Key Space
// =============================================================================

/// Collection name for products.
pub const PRODUCTS: &str = "products";

/// Collection name for invoices.
pub const INVOICES: &str = "invoices";

/// Collection name for categories.
pub const CATEGORIES: &str = "categories";

// =============================================================================
// Backend Trait
// =============================================================================

/// Trait for storage backend implementations.
///
/// Abstracts persistence operations, allowing the fallback store to treat
/// the remote Data API and the local JSON area interchangeably.
///
/// **IMPORTANT:** All methods use `&self` to allow concurrent access.
/// Implementations use interior mutability where they need it.
///
/// **ASYNC:** All methods are async and must be awaited.
#[allow(async_fn_in_trait)]
pub trait StorageBackend: Send + Sync {
    /// Returns all products. Order is unspecified.
    async fn get_products(&self) -> StoreResult<Vec<Product>>;

    /// Upserts a product by id.
    ///
    /// Replaces the stored document when a product with the same `id`
    /// exists, inserts otherwise. The caller is responsible for stamping
    /// `updated_at` before saving.
    async fn save_product(&self, product: &Product) -> StoreResult<()>;

    /// Removes the product with the given id.
    ///
    /// Deleting a non-existent id is a silent no-op, not an error.
    async fn delete_product(&self, id: &str) -> StoreResult<()>;

    /// Returns all invoices. Order is unspecified; callers sort by date
    /// descending where order matters.
    async fn get_invoices(&self) -> StoreResult<Vec<Invoice>>;

    /// Upserts an invoice by id.
    ///
    /// Upsert rather than plain insert keeps a retried save idempotent -
    /// a duplicate click cannot produce a duplicate invoice.
    async fn save_invoice(&self, invoice: &Invoice) -> StoreResult<()>;

    /// Mutates the status of one invoice in place.
    ///
    /// No other fields are altered. Unknown ids are a silent no-op.
    async fn update_invoice_status(&self, id: &str, status: InvoiceStatus) -> StoreResult<()>;

    /// Returns all categories. Order is unspecified.
    async fn get_categories(&self) -> StoreResult<Vec<Category>>;

    /// Upserts a category by id.
    async fn save_category(&self, category: &Category) -> StoreResult<()>;
}
