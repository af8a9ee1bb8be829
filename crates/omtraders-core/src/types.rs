//! # Domain Types
//!
//! Core domain types used throughout Om Traders Retail.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Invoice      │   │  InvoiceItem    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  product_id     │       │
//! │  │  name           │   │  customer_name  │   │  quantity       │       │
//! │  │  price (Money)  │   │  total (Money)  │   │  price (Money)  │       │
//! │  │  stock          │   │  status         │   │  (snapshot!)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  InvoiceStatus  │   │    Category     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Pending        │   │  id             │                             │
//! │  │  Paid           │   │  name           │                             │
//! │  │  Cancelled      │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Document Shape
//! Every persisted type serializes with camelCase field names so the stored
//! document reads the same whether it lives in the remote collection or the
//! local JSON area (`imageUrl`, `createdAt`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4), assigned at creation, immutable after.
    pub id: String,

    /// Display name shown in the catalog and on invoices.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Category label (free-form, not a foreign key).
    pub category: String,

    /// Physical dimensions, e.g. "2in x 3m".
    pub dimensions: String,

    /// URL of the product image.
    pub image_url: String,

    /// Unit price in paise.
    pub price: Money,

    /// Quantity on hand. Decremented by billing, never below zero.
    pub stock: i64,

    /// When the product was created. Set once.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated. Refreshed on every save.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether the requested quantity can be supplied from stock.
    #[inline]
    pub fn can_supply(&self, quantity: i64) -> bool {
        quantity > 0 && quantity <= self.stock
    }

    /// Checks whether the product is running low on stock.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock < crate::LOW_STOCK_THRESHOLD
    }
}

/// Caller-supplied fields for a new product.
///
/// The service layer assigns `id`, `created_at` and `updated_at` when the
/// product is first saved; everything else comes from the catalog form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub dimensions: String,
    pub image_url: String,
    pub price: Money,
    pub stock: i64,
}

// =============================================================================
// Invoice Status
// =============================================================================

/// The status of an invoice.
///
/// Starts as `Pending`; transitions to `Paid` via an explicit action.
/// There is no transition back. `Cancelled` is part of the document contract
/// but no code path produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Invoice has been issued but not settled.
    #[default]
    Pending,
    /// Invoice has been settled.
    Paid,
    /// Reserved in the document contract; never produced.
    Cancelled,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Pending => write!(f, "pending"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A line item on an invoice.
///
/// Uses the snapshot pattern: `price` is the product's unit price at the
/// moment the invoice was assembled, decoupled from later price changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    /// Product this line refers to (for name lookup on the printed invoice).
    pub product_id: String,

    /// Quantity billed.
    pub quantity: i64,

    /// Unit price in paise at billing time (frozen).
    pub price: Money,
}

impl InvoiceItem {
    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// A customer invoice.
///
/// Created whole - no partial or draft invoices are ever persisted. The
/// customer fields are a contact snapshot at billing time; there is no
/// customer entity to reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer name as entered on the billing form.
    pub customer_name: String,

    /// Customer address, when collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Customer phone number, when collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Ordered line items with snapshot prices.
    pub items: Vec<InvoiceItem>,

    /// Precomputed sum of `price × quantity` across items.
    /// Stored at creation time, not recomputed on read.
    pub total: Money,

    /// When the invoice was created.
    pub date: DateTime<Utc>,

    /// Settlement status.
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Recomputes the total from the line items.
    ///
    /// The stored `total` is authoritative; this exists so assembly and
    /// consistency checks can verify the invariant `total == Σ line totals`.
    pub fn computed_total(&self) -> Money {
        self.items.iter().map(InvoiceItem::line_total).sum()
    }
}

// =============================================================================
// Customer Details
// =============================================================================

/// Customer contact fields captured on the billing form.
///
/// Which of the optional fields are required is a deployment decision, see
/// [`crate::validation::RequiredCustomerFields`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl CustomerDetails {
    /// Convenience constructor for the common all-fields case.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        CustomerDetails {
            name: name.into(),
            address: Some(address.into()),
            phone: Some(phone.into()),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// Part of the storage contract (the backends persist a `categories`
/// collection) but not referenced by any billing or catalog flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Identifier Helper
// =============================================================================

/// Generates a fresh document identifier.
///
/// ## Why UUID v4?
/// Globally unique without coordination, so identifiers stay valid whether
/// the document lands in the remote collection or the local fallback area.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Pipe 2in".to_string(),
            description: "PVC pipe, 2 inch".to_string(),
            category: "PVC".to_string(),
            dimensions: "2in x 3m".to_string(),
            image_url: String::new(),
            price: Money::from_paise(15000),
            stock: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_invoice_status_default() {
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Pending);
    }

    #[test]
    fn test_invoice_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Paid).unwrap(),
            "\"paid\""
        );
    }

    #[test]
    fn test_can_supply() {
        let product = sample_product();
        assert!(product.can_supply(1));
        assert!(product.can_supply(10));
        assert!(!product.can_supply(11));
        assert!(!product.can_supply(0));
        assert!(!product.can_supply(-1));
    }

    #[test]
    fn test_low_stock() {
        let mut product = sample_product();
        assert!(!product.is_low_stock());
        product.stock = 4;
        assert!(product.is_low_stock());
    }

    #[test]
    fn test_product_document_field_names() {
        let product = sample_product();
        let doc = serde_json::to_value(&product).unwrap();
        // The persisted document uses camelCase keys
        assert!(doc.get("imageUrl").is_some());
        assert!(doc.get("createdAt").is_some());
        assert!(doc.get("updatedAt").is_some());
        assert!(doc.get("image_url").is_none());
    }

    #[test]
    fn test_invoice_line_totals() {
        let invoice = Invoice {
            id: "i-1".to_string(),
            customer_name: "Asha".to_string(),
            address: Some("Niphad, Nashik".to_string()),
            phone: Some("9800000000".to_string()),
            items: vec![
                InvoiceItem {
                    product_id: "p-1".to_string(),
                    quantity: 3,
                    price: Money::from_paise(15000),
                },
                InvoiceItem {
                    product_id: "p-2".to_string(),
                    quantity: 2,
                    price: Money::from_paise(500),
                },
            ],
            total: Money::from_paise(46000),
            date: Utc::now(),
            status: InvoiceStatus::Pending,
        };

        assert_eq!(invoice.items[0].line_total().paise(), 45000);
        assert_eq!(invoice.computed_total(), invoice.total);
    }
}
