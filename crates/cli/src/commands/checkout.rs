//! The interactive checkout flow.
//!
//! Terminal rendition of the payment modal: pick a method, enter its fields,
//! retry on validation errors, and finish on the confirmation display. The
//! engine drives the state machine; this module only prompts and prints.

use chrono::Utc;

use cocktail_haven_core::{Money, PaymentMethodKind};
use cocktail_haven_storefront::error::AppError;
use cocktail_haven_storefront::services::checkout::{
    CheckoutEngine, CheckoutError, PaymentFields, Receipt,
};
use cocktail_haven_storefront::services::invoice;
use cocktail_haven_storefront::state::AppState;
use cocktail_haven_storefront::store::UserRepository;

use super::{prompt, require_session};

/// Run a checkout session for the persisted cart.
pub async fn run(state: &AppState) -> Result<(), AppError> {
    let session = require_session(state).await?;

    let mut engine = CheckoutEngine::load(state.store()).await?;
    super::cart::print_cart(&engine);
    engine.begin_checkout()?;

    let receipt = loop {
        // Method selection
        println!("\nPayment method:");
        for (index, method) in PaymentMethodKind::ALL.iter().enumerate() {
            println!("  {}. {}", index + 1, method.label());
        }
        let choice = prompt("Choose a method (or 'cancel')")?;
        if choice.eq_ignore_ascii_case("cancel") {
            engine.cancel_checkout();
            println!("Checkout cancelled.");
            return Ok(());
        }
        let Some(method) = parse_method_choice(&choice) else {
            println!("Please choose 1, 2, or 3.");
            continue;
        };
        engine.select_method(method)?;

        // Field entry; a validation failure loops back here with the rest of
        // the session untouched
        match enter_and_submit(&mut engine, method).await? {
            Submission::Confirmed(receipt) => break receipt,
            Submission::SwitchMethod => {}
            Submission::Cancelled => {
                engine.cancel_checkout();
                println!("Checkout cancelled.");
                return Ok(());
            }
        }
    };

    println!("\nPayment confirmed!");
    println!("Payment method: {}", receipt.method);
    println!("Total paid: {}", Money::usd(receipt.total));

    spawn_invoice(state, &session.to_string(), receipt).await;

    Ok(())
}

enum Submission {
    Confirmed(Receipt),
    SwitchMethod,
    Cancelled,
}

fn parse_method_choice(choice: &str) -> Option<PaymentMethodKind> {
    let index: usize = choice.parse().ok()?;
    index
        .checked_sub(1)
        .and_then(|i| PaymentMethodKind::ALL.get(i))
        .copied()
}

/// Prompt for the selected method's fields and submit, retrying on
/// validation errors until the payment confirms or the user backs out.
async fn enter_and_submit(
    engine: &mut CheckoutEngine<'_>,
    method: PaymentMethodKind,
) -> Result<Submission, AppError> {
    loop {
        println!("\n{} details ('back' switches method, 'cancel' exits):", method.label());
        let fields = match read_fields(method)? {
            FieldInput::Fields(fields) => fields,
            FieldInput::Back => return Ok(Submission::SwitchMethod),
            FieldInput::Cancel => return Ok(Submission::Cancelled),
        };

        match engine.submit_payment(fields).await {
            Ok(receipt) => return Ok(Submission::Confirmed(receipt)),
            // Validation failures are correctable: report and re-prompt
            Err(CheckoutError::Payment(violation)) => {
                println!("{}", AppError::Checkout(CheckoutError::Payment(violation)).alert_message());
            }
            Err(other) => return Err(other.into()),
        }
    }
}

enum FieldInput {
    Fields(PaymentFields),
    Back,
    Cancel,
}

fn read_fields(method: PaymentMethodKind) -> Result<FieldInput, AppError> {
    let read = |label: &str| -> Result<Option<String>, AppError> {
        let value = prompt(label)?;
        if value.eq_ignore_ascii_case("back") {
            return Ok(None);
        }
        if value.eq_ignore_ascii_case("cancel") {
            return Ok(Some("cancel".to_string()));
        }
        Ok(Some(value))
    };

    macro_rules! field {
        ($label:expr) => {
            match read($label)? {
                Some(value) if value == "cancel" => return Ok(FieldInput::Cancel),
                Some(value) => value,
                None => return Ok(FieldInput::Back),
            }
        };
    }

    let fields = match method {
        PaymentMethodKind::CreditCard => {
            let card_number = field!("Card number (16 digits)");
            let expiration = field!("Expiration date (MM/YYYY)");
            let cvv = field!("CVV (3 digits)");
            PaymentFields::CreditCard {
                card_number,
                expiration_date: (!expiration.is_empty()).then_some(expiration),
                cvv,
            }
        }
        PaymentMethodKind::PayPal => PaymentFields::PayPal {
            email: field!("PayPal email"),
        },
        PaymentMethodKind::BankTransfer => PaymentFields::BankTransfer {
            account_number: field!("Bank account number (at least 10 digits)"),
        },
    };
    Ok(FieldInput::Fields(fields))
}

/// Write the invoice as an explicit spawned task and log its outcome.
/// Invoice failures never affect the already-confirmed payment.
async fn spawn_invoice(state: &AppState, session_email: &str, receipt: Receipt) {
    let users = UserRepository::new(state.store());
    let customer_name = match users.customer_name().await {
        Ok(Some(name)) => name,
        Ok(None) => session_email.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read customer name; using session email");
            session_email.to_string()
        }
    };

    let invoice_dir = state.config().invoice_dir.clone();
    let handle = tokio::spawn(async move {
        invoice::write_invoice(&receipt, &customer_name, Utc::now().date_naive(), &invoice_dir)
            .await
    });

    match handle.await {
        Ok(Ok(path)) => println!("Invoice saved to {}.", path.display()),
        Ok(Err(e)) => tracing::error!(error = %e, "Failed to write invoice"),
        Err(e) => tracing::error!(error = %e, "Invoice task failed"),
    }
}
