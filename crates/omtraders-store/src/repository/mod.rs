//! # Repository Module
//!
//! Service implementations mediating between UI state and the storage
//! backends.
//!
//! ## Service Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Service Pattern Explained                            │
//! │                                                                         │
//! │  The services own the session state the screens render from.           │
//! │                                                                         │
//! │  Billing screen                                                         │
//! │       │                                                                 │
//! │       │  products.add_product(fields)                                   │
//! │       │  invoices.create_invoice(customer, selection)                   │
//! │       ▼                                                                 │
//! │  ProductService / InvoiceService                                       │
//! │  ├── validate (before any write)                                        │
//! │  ├── delegate to the fallback store                                     │
//! │  ├── refetch the full product list after every mutation                 │
//! │  └── report the outcome on the notification channel                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store (remote + local fallback)                                        │
//! │                                                                         │
//! │  Full refetch instead of incremental patching keeps the cache simple   │
//! │  and is plenty fast at a small shop's catalog size.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Services
//!
//! - [`product::ProductService`] - Catalog CRUD and the session cache
//! - [`invoice::InvoiceService`] - Invoice assembly, listing, settlement

pub mod invoice;
pub mod product;
