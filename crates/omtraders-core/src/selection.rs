//! # Working Selection
//!
//! The in-memory selection a bill is assembled from.
//!
//! ## Selection Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Selection Operations                                 │
//! │                                                                         │
//! │  Billing Screen Action       Selection Change                           │
//! │  ─────────────────────       ────────────────                           │
//! │                                                                         │
//! │  Pick product + qty ───────► add_item()        items.push / merge      │
//! │                                                                         │
//! │  Change quantity ──────────► update_quantity() items[i].quantity = n   │
//! │                                                                         │
//! │  Remove line ──────────────► remove_item()     items.remove(i)         │
//! │                                                                         │
//! │  Invoice created ──────────► clear()           items.clear()           │
//! │                                                                         │
//! │  Every add re-checks the requested quantity against the product's      │
//! │  stock on hand; the invoice service re-checks again at commit time.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_quantity, validate_quantity_for};
use crate::{MAX_ITEM_QUANTITY, MAX_SELECTION_ITEMS};

// =============================================================================
// Selection Item
// =============================================================================

/// A line in the working selection.
///
/// ## Design Notes
/// - `product_id`: Reference to the product (for catalog lookup)
/// - `name`/`unit_price`: Frozen copies taken when the product was added,
///   so the billing table displays consistent data even if the catalog
///   changes underneath it. The price actually billed is re-snapshotted
///   from the catalog when the invoice is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionItem {
    /// Product ID (UUID)
    pub product_id: String,

    /// Product name at time of adding (frozen, display only)
    pub name: String,

    /// Unit price at time of adding (frozen, display only)
    pub unit_price: Money,

    /// Quantity selected
    pub quantity: i64,
}

impl SelectionItem {
    /// Creates a new selection line from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        SelectionItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// Display line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The working selection.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product merges
///   quantities, re-validated against stock)
/// - Quantity is always > 0 (updating to 0 removes the line)
/// - Maximum lines: [`MAX_SELECTION_ITEMS`]
/// - Maximum quantity per line: [`MAX_ITEM_QUANTITY`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Lines in the selection
    pub items: Vec<SelectionItem>,
}

impl Selection {
    /// Creates a new empty selection.
    pub fn new() -> Self {
        Selection { items: Vec::new() }
    }

    /// Adds a product to the selection or merges into an existing line.
    ///
    /// ## Behavior
    /// - If the product is already selected: quantities merge, and the
    ///   merged quantity is re-checked against stock and the per-line cap
    /// - If not: a new line is added with a frozen name/price snapshot
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity_for(product, quantity)?;

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.id)
        {
            let new_quantity = item.quantity + quantity;
            if new_quantity > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_quantity,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            if !product.can_supply(new_quantity) {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                    requested: new_quantity,
                });
            }
            item.quantity = new_quantity;
            return Ok(());
        }

        if self.items.len() >= MAX_SELECTION_ITEMS {
            return Err(CoreError::SelectionTooLarge {
                max: MAX_SELECTION_ITEMS,
            });
        }

        self.items.push(SelectionItem::from_product(product, quantity));
        Ok(())
    }

    /// Updates the quantity of a line in the selection.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line
    /// - Unknown product id is an error
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
            Ok(())
        } else {
            Err(CoreError::ProductNotFound(product_id.to_string()))
        }
    }

    /// Removes a line from the selection by product ID.
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::ProductNotFound(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the selection.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of unique lines in the selection.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Display total across all lines (frozen add-time prices).
    pub fn total(&self) -> Money {
        self.items.iter().map(SelectionItem::line_total).sum()
    }

    /// Checks if the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_product(id: &str, price_paise: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: String::new(),
            category: "PVC".to_string(),
            dimensions: String::new(),
            image_url: String::new(),
            price: Money::from_paise(price_paise),
            stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_item() {
        let mut selection = Selection::new();
        let product = test_product("1", 999, 20); // ₹9.99

        selection.add_item(&product, 2).unwrap();

        assert_eq!(selection.item_count(), 1);
        assert_eq!(selection.total_quantity(), 2);
        assert_eq!(selection.total().paise(), 1998); // ₹19.98
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut selection = Selection::new();
        let product = test_product("1", 999, 20);

        selection.add_item(&product, 2).unwrap();
        selection.add_item(&product, 3).unwrap();

        assert_eq!(selection.item_count(), 1); // Still one unique line
        assert_eq!(selection.total_quantity(), 5);
    }

    #[test]
    fn test_add_rejects_insufficient_stock() {
        let mut selection = Selection::new();
        let product = test_product("1", 999, 4);

        assert!(selection.add_item(&product, 5).is_err());
        assert!(selection.is_empty());

        // Merging over the stock limit is also rejected
        selection.add_item(&product, 3).unwrap();
        assert!(matches!(
            selection.add_item(&product, 2),
            Err(CoreError::InsufficientStock { available: 4, requested: 5, .. })
        ));
        assert_eq!(selection.total_quantity(), 3);
    }

    #[test]
    fn test_add_freezes_price_snapshot() {
        let mut selection = Selection::new();
        let mut product = test_product("1", 1000, 20);

        selection.add_item(&product, 1).unwrap();
        product.price = Money::from_paise(2000);

        // The selection still shows the add-time price
        assert_eq!(selection.items[0].unit_price.paise(), 1000);
    }

    #[test]
    fn test_update_quantity() {
        let mut selection = Selection::new();
        let product = test_product("1", 999, 20);

        selection.add_item(&product, 2).unwrap();
        selection.update_quantity("1", 7).unwrap();
        assert_eq!(selection.total_quantity(), 7);

        // Zero removes the line
        selection.update_quantity("1", 0).unwrap();
        assert!(selection.is_empty());

        assert!(selection.update_quantity("missing", 1).is_err());
    }

    #[test]
    fn test_remove_item() {
        let mut selection = Selection::new();
        let product = test_product("1", 999, 20);

        selection.add_item(&product, 2).unwrap();
        selection.remove_item("1").unwrap();
        assert!(selection.is_empty());

        assert!(matches!(
            selection.remove_item("1"),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::new();
        let product = test_product("1", 999, 20);

        selection.add_item(&product, 2).unwrap();
        assert!(!selection.is_empty());

        selection.clear();
        assert!(selection.is_empty());
    }
}
