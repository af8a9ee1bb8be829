//! # omtraders-store: Storage Layer for Om Traders Retail
//!
//! This crate provides persistence for the retail application: a remote
//! document-store Data API backed by a local JSON fallback area, and the
//! product/invoice services the UI screens consume.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Om Traders Retail Data Flow                           │
//! │                                                                         │
//! │  UI Screen (catalog form, billing, dashboard)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  omtraders-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐    ┌────────────────┐    ┌─────────────┐  │   │
//! │  │   │   Services     │    │     Store      │    │  Backends   │  │   │
//! │  │   │ (repository/)  │    │   (store.rs)   │    │ (backend/)  │  │   │
//! │  │   │                │    │                │    │             │  │   │
//! │  │   │ ProductService │───►│ primary (opt.) │───►│ Remote API  │  │   │
//! │  │   │ InvoiceService │    │ fallback       │───►│ Local JSON  │  │   │
//! │  │   └────────────────┘    └────────────────┘    └─────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                              │                                  │
//! │       ▼                              ▼                                  │
//! │  POST {base}/find|insertOne|...  {data_dir}/products.json              │
//! │  header: api-key                 {data_dir}/invoices.json              │
//! │  (remote document store)         {data_dir}/categories.json            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fallback Contract
//!
//! Every operation tries the remote backend first (when configured) and
//! transparently retries against local persistence on **any** failure -
//! network error, non-2xx response, missing configuration. Callers never see
//! a hard failure for transient remote unavailability; the distinction is
//! only visible through [`Store::is_using_fallback`], which drives an
//! advisory banner and must never gate correctness. Data written during a
//! fallback window stays local - there is no later reconciliation.
//!
//! ## Module Organization
//!
//! - [`backend`] - The [`backend::StorageBackend`] contract and both
//!   implementations
//! - [`store`] - The `{primary, fallback}` policy object
//! - [`repository`] - Product and invoice services with the session cache
//! - [`config`] - Store and remote endpoint configuration
//! - [`notify`] - The notification side channel surfaced to the UI
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use omtraders_store::{RetailStore, StoreConfig};
//! use omtraders_store::repository::{InvoiceService, ProductService};
//! use std::sync::Arc;
//!
//! let config = StoreConfig::from_env("./data");
//! let store = Arc::new(RetailStore::from_config(&config));
//!
//! let products = Arc::new(ProductService::new(store.clone()));
//! products.refresh().await?;
//!
//! let invoices = InvoiceService::new(store, products.clone())
//!     .with_required_fields(config.required_customer_fields);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod config;
pub mod error;
pub mod notify;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{LocalBackend, RemoteBackend, StorageBackend};
pub use config::{RemoteConfig, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use notify::{MemoryNotifier, Notification, Notifier, Severity, TracingNotifier};
pub use store::{RetailStore, Store};

// Service re-exports for convenience
pub use repository::invoice::InvoiceService;
pub use repository::product::{CatalogState, ProductService};
