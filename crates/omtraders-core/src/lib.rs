//! # omtraders-core: Pure Business Logic for Om Traders Retail
//!
//! This crate is the **heart** of the retail application. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Om Traders Retail Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  UI Screens (out of scope)                      │   │
//! │  │    Catalog ──► Billing ──► Invoice PDF ──► Dashboard           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  omtraders-store (services)                     │   │
//! │  │    ProductService, InvoiceService, Store (remote + fallback)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ omtraders-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ selection │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ Selection │  │   rules   │  │   │
//! │  │   │  Invoice  │  │  (paise)  │  │   items   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Invoice, Category, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`selection`] - The working selection a bill is assembled from
//! - [`stats`] - Dashboard statistics projections
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use omtraders_core::money::Money;
//!
//! // Create money from paise (never from floats!)
//! let price = Money::from_paise(15000); // ₹150.00
//!
//! // Line total for three units
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.paise(), 45000); // ₹450.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod selection;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use omtraders_core::Money` instead of
// `use omtraders_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use selection::{Selection, SelectionItem};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which a product is flagged as running low.
///
/// ## Business Reason
/// The dashboard and billing screens warn the shopkeeper before a product
/// sells out entirely, leaving time to restock.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Maximum line items allowed in a single working selection.
///
/// ## Business Reason
/// Prevents runaway selections and ensures reasonable invoice sizes.
pub const MAX_SELECTION_ITEMS: usize = 100;

/// Maximum quantity of a single item in a selection.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
