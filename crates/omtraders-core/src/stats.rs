//! # Dashboard Statistics
//!
//! Pure projections of catalog + invoice data for the dashboard screen.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dashboard Projections                                │
//! │                                                                         │
//! │  getProducts() ──┐                                                     │
//! │                  ├──► sales_summary()  ──► totals + revenue            │
//! │  getInvoices() ──┤                                                     │
//! │                  ├──► top_selling()    ──► best sellers by units       │
//! │                  │                                                      │
//! │                  └──► low_stock()      ──► restock warnings            │
//! │                                                                         │
//! │  All functions are pure: they take slices, return owned summaries,     │
//! │  and never touch storage. Revenue uses the snapshot prices stored on   │
//! │  the invoice lines, not the current catalog prices.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Invoice, Product};

// =============================================================================
// Summary Types
// =============================================================================

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_products: usize,
    pub total_invoices: usize,
    /// Sum of invoice totals (snapshot prices), all statuses included.
    pub total_revenue: Money,
}

/// A best-selling product, aggregated across all invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub id: String,
    pub name: String,
    pub units_sold: i64,
    /// Revenue from this product's invoice lines (snapshot prices).
    pub revenue: Money,
}

// =============================================================================
// Projections
// =============================================================================

/// Computes the headline dashboard figures.
pub fn sales_summary(products: &[Product], invoices: &[Invoice]) -> SalesSummary {
    let total_revenue = invoices.iter().map(|inv| inv.total).sum();

    SalesSummary {
        total_products: products.len(),
        total_invoices: invoices.len(),
        total_revenue,
    }
}

/// Computes the best-selling products by units sold.
///
/// ## Behavior
/// - Aggregates every invoice line by product id
/// - Lines whose product no longer exists in the catalog are skipped
///   (the dashboard can't name a deleted product)
/// - Sorted by units sold descending, name ascending for stable ties
/// - At most `limit` entries
pub fn top_selling(products: &[Product], invoices: &[Invoice], limit: usize) -> Vec<TopProduct> {
    let mut sales: HashMap<&str, TopProduct> = HashMap::new();

    for invoice in invoices {
        for item in &invoice.items {
            let Some(product) = products.iter().find(|p| p.id == item.product_id) else {
                continue;
            };

            let entry = sales.entry(product.id.as_str()).or_insert_with(|| TopProduct {
                id: product.id.clone(),
                name: product.name.clone(),
                units_sold: 0,
                revenue: Money::zero(),
            });
            entry.units_sold += item.quantity;
            entry.revenue += item.line_total();
        }
    }

    let mut top: Vec<TopProduct> = sales.into_values().collect();
    top.sort_by(|a, b| {
        b.units_sold
            .cmp(&a.units_sold)
            .then_with(|| a.name.cmp(&b.name))
    });
    top.truncate(limit);
    top
}

/// Returns the products running low on stock, for restock warnings.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock()).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
