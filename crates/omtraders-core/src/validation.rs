//! # Validation Module
//!
//! Input validation utilities for Om Traders Retail.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Billing / catalog form (out of scope here)                   │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Required customer fields (per deployment)                         │
//! │  ├── Non-negative price/stock                                          │
//! │  └── Quantity against stock on hand                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Commit-time re-check in the invoice service                  │
//! │  └── Stock re-validated against the current catalog before any write   │
//! │                                                                         │
//! │  Validation failures are rejected BEFORE any persistence call runs;    │
//! │  no partial state is ever written for an invalid request.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{CustomerDetails, NewProduct, Product};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Required Customer Fields
// =============================================================================

/// Which optional customer fields a deployment requires on the billing form.
///
/// The customer name is always required. Some shops bill walk-in customers
/// with nothing but a name; others (like the original Om Traders deployment)
/// insist on address and phone for every invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredCustomerFields {
    pub address: bool,
    pub phone: bool,
}

impl RequiredCustomerFields {
    /// Name only - the loosest configuration.
    pub const fn name_only() -> Self {
        RequiredCustomerFields {
            address: false,
            phone: false,
        }
    }

    /// Name, address and phone all required.
    pub const fn all() -> Self {
        RequiredCustomerFields {
            address: true,
            phone: true,
        }
    }
}

impl Default for RequiredCustomerFields {
    /// The original deployment required every field.
    fn default() -> Self {
        RequiredCustomerFields::all()
    }
}

// =============================================================================
// Customer Validators
// =============================================================================

/// Validates the customer fields on a billing request.
///
/// ## Rules
/// - `name` must not be empty (after trim), max 200 characters
/// - `address`/`phone` must be present and non-empty when the deployment
///   requires them
pub fn validate_customer(
    details: &CustomerDetails,
    required: RequiredCustomerFields,
) -> ValidationResult<()> {
    let name = details.name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customerName".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "customerName".to_string(),
            max: 200,
        });
    }

    if required.address && details.address.as_deref().map_or(true, |a| a.trim().is_empty()) {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    if required.phone && details.phone.as_deref().map_or(true, |p| p.trim().is_empty()) {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Product Validators
// =============================================================================

/// Validates the caller-supplied fields for a new or edited product.
///
/// ## Rules
/// - Name must not be empty, max 200 characters
/// - Price must be non-negative (zero is allowed - free samples exist)
/// - Stock must be non-negative
pub fn validate_product_fields(fields: &NewProduct) -> ValidationResult<()> {
    let name = fields.name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    if fields.price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    if fields.stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Quantity Validators
// =============================================================================

/// Validates a requested quantity against a product's stock on hand.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Billing: Add Product to Selection                                      │
/// │                                                                         │
/// │  User enters quantity: 5                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity_for(product, 5) ← THIS FUNCTION                     │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       ├── qty > stock? → Error: "Insufficient stock for ..."           │
/// │       │                                                                 │
/// │       └── OK → Proceed with Selection::add_item                        │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity_for(product: &Product, quantity: i64) -> crate::CoreResult<()> {
    validate_quantity(quantity)?;

    if !product.can_supply(quantity) {
        return Err(crate::CoreError::InsufficientStock {
            name: product.name.clone(),
            available: product.stock,
            requested: quantity,
        });
    }

    Ok(())
}

/// Validates a quantity value in isolation.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::Utc;

    fn customer(name: &str, address: Option<&str>, phone: Option<&str>) -> CustomerDetails {
        CustomerDetails {
            name: name.to_string(),
            address: address.map(str::to_string),
            phone: phone.map(str::to_string),
        }
    }

    fn product_with_stock(stock: i64) -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Pipe 2in".to_string(),
            description: String::new(),
            category: "PVC".to_string(),
            dimensions: String::new(),
            image_url: String::new(),
            price: Money::from_paise(15000),
            stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_customer_all_required() {
        let required = RequiredCustomerFields::all();

        assert!(validate_customer(
            &customer("Asha", Some("Niphad"), Some("9800000000")),
            required
        )
        .is_ok());

        assert!(validate_customer(&customer("", Some("Niphad"), Some("98")), required).is_err());
        assert!(validate_customer(&customer("Asha", None, Some("98")), required).is_err());
        assert!(validate_customer(&customer("Asha", Some("Niphad"), None), required).is_err());
        // Whitespace-only counts as missing
        assert!(validate_customer(&customer("Asha", Some("  "), Some("98")), required).is_err());
    }

    #[test]
    fn test_validate_customer_name_only() {
        let required = RequiredCustomerFields::name_only();

        assert!(validate_customer(&customer("Asha", None, None), required).is_ok());
        assert!(validate_customer(&customer("   ", None, None), required).is_err());
    }

    #[test]
    fn test_validate_product_fields() {
        let mut fields = NewProduct {
            name: "Pipe 2in".to_string(),
            description: String::new(),
            category: "PVC".to_string(),
            dimensions: String::new(),
            image_url: String::new(),
            price: Money::from_paise(15000),
            stock: 10,
        };
        assert!(validate_product_fields(&fields).is_ok());

        fields.price = Money::from_paise(0);
        assert!(validate_product_fields(&fields).is_ok());

        fields.price = Money::from_paise(-1);
        assert!(validate_product_fields(&fields).is_err());

        fields.price = Money::from_paise(100);
        fields.stock = -1;
        assert!(validate_product_fields(&fields).is_err());

        fields.stock = 0;
        fields.name = "  ".to_string();
        assert!(validate_product_fields(&fields).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_quantity_for_product() {
        let product = product_with_stock(3);

        assert!(validate_quantity_for(&product, 3).is_ok());
        assert!(matches!(
            validate_quantity_for(&product, 5),
            Err(crate::CoreError::InsufficientStock { available: 3, requested: 5, .. })
        ));
        assert!(validate_quantity_for(&product, 0).is_err());
    }
}
