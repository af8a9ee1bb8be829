//! # Invoice Service
//!
//! Converts a working selection plus customer fields into a persisted
//! invoice, adjusting inventory on the way.
//!
//! ## Assembly Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Assembly                                     │
//! │                                                                         │
//! │  1. Validate customer fields (per deployment) + non-empty selection    │
//! │  2. Commit-time re-check: every line resolved against the CURRENT      │
//! │     catalog; missing product or short stock rejects the whole invoice  │
//! │     BEFORE any write                                                   │
//! │  3. Line prices snapshot the current catalog price                     │
//! │  4. Decrement stock per line via ProductService::update_product        │
//! │     - independent calls, NOT a transaction                             │
//! │     - per-line results are collected; failures are logged along with   │
//! │       which lines succeeded, and no rollback is attempted              │
//! │  5. Build invoice: fresh id, status = pending, date = now,             │
//! │     total = Σ price × quantity                                         │
//! │  6. Persist, hand the invoice back for the PDF preview, clear the      │
//! │     selection                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Settlement is one-way: `mark_paid` moves pending → paid and nothing
//! moves back. No code path produces `cancelled`.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use omtraders_core::validation::{validate_customer, RequiredCustomerFields};
use omtraders_core::{
    new_document_id, CoreError, CustomerDetails, Invoice, InvoiceItem, InvoiceStatus, Money,
    Selection,
};

use crate::backend::StorageBackend;
use crate::error::StoreResult;
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::repository::product::{CatalogState, ProductService};

// =============================================================================
// Invoice Service
// =============================================================================

/// Billing service: invoice assembly, listing and settlement.
pub struct InvoiceService<S> {
    store: Arc<S>,
    products: Arc<ProductService<S>>,
    required_fields: RequiredCustomerFields,
    notifier: Arc<dyn Notifier>,
}

impl<S: StorageBackend> InvoiceService<S> {
    /// Creates a service over the given store and product service.
    pub fn new(store: Arc<S>, products: Arc<ProductService<S>>) -> Self {
        InvoiceService {
            store,
            products,
            required_fields: RequiredCustomerFields::default(),
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Overrides which customer fields this deployment requires.
    pub fn with_required_fields(mut self, required: RequiredCustomerFields) -> Self {
        self.required_fields = required;
        self
    }

    /// Injects a notification channel.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Returns all invoices, newest first.
    pub async fn invoices(&self) -> StoreResult<Vec<Invoice>> {
        let mut invoices = self.store.get_invoices().await?;
        invoices.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(invoices)
    }

    /// Returns the unsettled invoices, newest first.
    pub async fn pending_invoices(&self) -> StoreResult<Vec<Invoice>> {
        let mut invoices = self.invoices().await?;
        invoices.retain(|inv| inv.status != InvoiceStatus::Paid);
        Ok(invoices)
    }

    /// Assembles and persists an invoice from the working selection.
    ///
    /// On success the selection is cleared and the invoice handed back for
    /// the PDF preview. On any validation failure nothing is written.
    pub async fn create_invoice(
        &self,
        customer: CustomerDetails,
        selection: &mut Selection,
    ) -> StoreResult<Invoice> {
        if let Err(err) = validate_customer(&customer, self.required_fields) {
            self.notifier.notify(Notification::error(
                "Error",
                "Please fill in all required fields",
            ));
            return Err(err.into());
        }

        if selection.is_empty() {
            self.notifier.notify(Notification::error(
                "Error",
                "Please fill in all required fields",
            ));
            return Err(CoreError::EmptySelection.into());
        }

        // The cached catalog is the commit-time truth; make sure it exists
        if self.products.state().await == CatalogState::Loading {
            self.products.refresh().await?;
        }

        // Commit-time re-check: stock may have moved since the lines were
        // selected. Any short line rejects the whole invoice before a write.
        let catalog = self.products.products().await;
        let mut lines = Vec::with_capacity(selection.items.len());
        for item in &selection.items {
            let Some(product) = catalog.iter().find(|p| p.id == item.product_id) else {
                let err = CoreError::ProductNotFound(item.product_id.clone());
                self.notifier
                    .notify(Notification::error("Error", err.to_string()));
                return Err(err.into());
            };

            if !product.can_supply(item.quantity) {
                let err = CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                    requested: item.quantity,
                };
                self.notifier
                    .notify(Notification::error("Error", err.to_string()));
                return Err(err.into());
            }

            lines.push((product.clone(), item.quantity));
        }

        // Snapshot the CURRENT catalog price onto each line
        let items: Vec<InvoiceItem> = lines
            .iter()
            .map(|(product, quantity)| InvoiceItem {
                product_id: product.id.clone(),
                quantity: *quantity,
                price: product.price,
            })
            .collect();
        let total: Money = items.iter().map(InvoiceItem::line_total).sum();

        // Decrement stock line by line. These are independent saves, not a
        // transaction: a failure leaves earlier lines decremented and later
        // ones untouched, so record exactly which lines went through.
        let mut decremented = Vec::new();
        let mut failed = Vec::new();
        for (product, quantity) in &lines {
            let mut updated = product.clone();
            updated.stock -= quantity;
            match self.products.update_product(updated).await {
                Ok(()) => decremented.push(product.name.clone()),
                Err(err) => {
                    warn!(product = %product.name, error = %err, "Stock decrement failed");
                    failed.push(product.name.clone());
                }
            }
        }
        if !failed.is_empty() {
            warn!(
                succeeded = ?decremented,
                failed = ?failed,
                "Stock decrement partially failed; no rollback is attempted"
            );
            self.notifier.notify(Notification::error(
                "Error",
                format!("Stock update failed for: {}", failed.join(", ")),
            ));
        }

        let invoice = Invoice {
            id: new_document_id(),
            customer_name: customer.name,
            address: customer.address,
            phone: customer.phone,
            items,
            total,
            date: Utc::now(),
            status: InvoiceStatus::Pending,
        };

        if let Err(err) = self.store.save_invoice(&invoice).await {
            self.notifier
                .notify(Notification::error("Error", "Failed to create invoice"));
            return Err(err);
        }

        info!(id = %invoice.id, customer = %invoice.customer_name, total = %invoice.total, "Invoice created");
        self.notifier.notify(Notification::info(
            "Invoice created",
            format!(
                "Invoice for {} has been created successfully.",
                invoice.customer_name
            ),
        ));

        selection.clear();
        Ok(invoice)
    }

    /// Marks an invoice as paid.
    ///
    /// There is no way back to pending, and nothing ever produces
    /// `cancelled`.
    pub async fn mark_paid(&self, invoice_id: &str) -> StoreResult<()> {
        if let Err(err) = self
            .store
            .update_invoice_status(invoice_id, InvoiceStatus::Paid)
            .await
        {
            self.notifier.notify(Notification::error(
                "Error",
                "Failed to update invoice status",
            ));
            return Err(err);
        }

        info!(id = %invoice_id, "Invoice marked as paid");
        self.notifier.notify(Notification::info(
            "Status Updated",
            "Invoice has been marked as paid",
        ));
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
