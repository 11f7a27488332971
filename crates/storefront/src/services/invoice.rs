//! Invoice document rendering.
//!
//! Renders a confirmed payment's receipt into a plain-text invoice and
//! persists it under the invoice directory. Invoicing is a side effect of
//! checkout, driven by the caller as a spawned task: its failure is logged
//! and never surfaces into the checkout state machine.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use cocktail_haven_core::Money;

use super::checkout::{Receipt, TAX_RATE};

/// File name of the generated invoice; a new purchase replaces the previous
/// document.
const INVOICE_FILE_NAME: &str = "invoice.txt";

/// Errors that can occur while writing an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("failed to write invoice: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the invoice document for a receipt.
///
/// Line items are listed with quantity and unit price; the footer recomputes
/// the subtotal and 12% tax from the lines, like the totals block of the
/// checkout screen.
#[must_use]
pub fn render(receipt: &Receipt, customer_name: &str, date: NaiveDate) -> String {
    let subtotal: Decimal = receipt.lines.iter().map(|line| line.line_total()).sum();
    let tax = subtotal * TAX_RATE;
    let total = subtotal + tax;

    let mut doc = String::new();
    doc.push_str("PURCHASE INVOICE\n");
    doc.push_str("================\n\n");
    doc.push_str(&format!("Customer: {customer_name}\n"));
    doc.push_str(&format!("Date: {date}\n"));
    doc.push_str(&format!("Payment method: {}\n\n", receipt.method));

    doc.push_str(&format!(
        "{:<30} {:>4} {:>10}\n",
        "Product", "Qty", "Price"
    ));
    doc.push_str(&format!("{:-<46}\n", ""));
    for line in &receipt.lines {
        doc.push_str(&format!(
            "{:<30} {:>4} {:>10}\n",
            line.name,
            line.quantity,
            Money::usd(line.price).to_string()
        ));
    }
    doc.push_str(&format!("{:-<46}\n", ""));

    doc.push_str(&format!("Subtotal: {}\n", Money::usd(subtotal)));
    doc.push_str(&format!("Tax (12%): {}\n", Money::usd(tax)));
    doc.push_str(&format!("Total: {}\n", Money::usd(total)));

    doc
}

/// Render and persist the invoice, returning the path it was written to.
///
/// # Errors
///
/// Returns `InvoiceError::Io` if the directory cannot be created or the
/// document cannot be written.
pub async fn write_invoice(
    receipt: &Receipt,
    customer_name: &str,
    date: NaiveDate,
    invoice_dir: &Path,
) -> Result<PathBuf, InvoiceError> {
    let document = render(receipt, customer_name, date);

    tokio::fs::create_dir_all(invoice_dir).await?;
    let path = invoice_dir.join(INVOICE_FILE_NAME);
    tokio::fs::write(&path, document).await?;

    tracing::info!(path = %path.display(), "Invoice written");
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cocktail_haven_core::{DrinkId, LineId, PaymentMethodKind};

    use super::*;
    use crate::models::cart::CartLine;

    fn receipt() -> Receipt {
        let lines = vec![
            CartLine {
                line_id: LineId::generate(),
                drink_id: DrinkId::new("11007"),
                name: "Margarita".to_string(),
                thumb: None,
                price: Decimal::new(899, 2),
                quantity: 1,
            },
            CartLine {
                line_id: LineId::generate(),
                drink_id: DrinkId::new("17105"),
                name: "Singapore Sling".to_string(),
                thumb: None,
                price: Decimal::new(699, 2),
                quantity: 2,
            },
        ];
        Receipt {
            method: PaymentMethodKind::CreditCard,
            total: Decimal::new(257_264, 4),
            lines,
        }
    }

    #[test]
    fn test_render_contains_items_and_totals() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        let doc = render(&receipt(), "Ana Lopez", date);

        assert!(doc.contains("Customer: Ana Lopez"));
        assert!(doc.contains("Date: 2026-08-04"));
        assert!(doc.contains("Payment method: Credit Card"));
        assert!(doc.contains("Margarita"));
        assert!(doc.contains("Singapore Sling"));
        assert!(doc.contains("Subtotal: $22.97"));
        assert!(doc.contains("Tax (12%): $2.76"));
        assert!(doc.contains("Total: $25.73"));
    }

    #[tokio::test]
    async fn test_write_invoice_creates_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();

        let path = write_invoice(&receipt(), "Ana Lopez", date, dir.path())
            .await
            .unwrap();

        assert!(path.ends_with(INVOICE_FILE_NAME));
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.contains("PURCHASE INVOICE"));
    }
}
