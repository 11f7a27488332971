//! The cart & checkout engine.
//!
//! Exclusive owner of cart mutation. Every mutation is written through to the
//! Persistent Store before it is committed to memory, so a failed write never
//! leaves the in-memory cart ahead of the durable copy, and because each
//! operation awaits its write before returning, rapid successive mutations
//! reach the store in issuance order.
//!
//! # Checkout state machine
//!
//! ```text
//! Idle -> MethodSelection -> FieldEntry -> (validating) -> FieldEntry   on failure
//!                                                       -> Confirmed   on success (terminal)
//! ```
//!
//! [`CheckoutEngine::begin_checkout`] snapshots the cart total into a
//! [`PendingPayment`] and is only offered for a non-empty cart. Switching
//! methods re-enters `FieldEntry` with blanked fields so nothing leaks across
//! methods. Validation happens inside [`CheckoutEngine::submit_payment`]; a
//! failure leaves cart, fields, and state untouched for correction, while
//! success deletes the cart key outright, clears the fields, and enters the
//! terminal `Confirmed` state. Cancellation from any non-terminal state
//! returns to `Idle` without mutating the cart.

mod error;
pub mod payment;
pub mod pricing;

pub use error::{CheckoutError, PaymentError};
pub use payment::PaymentFields;

use chrono::Utc;
use rust_decimal::Decimal;

use cocktail_haven_core::{LineId, PaymentMethodKind};

use crate::catalog::DrinkSummary;
use crate::models::cart::{Cart, CartLine};
use crate::store::{CartRepository, Store};

/// Fixed tax rate applied to the subtotal (12%).
pub const TAX_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 2);

/// The cart's derived amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// The derived amounts for a cart: subtotal, 12% tax, and their sum.
#[must_use]
pub fn totals_for(cart: &Cart) -> Totals {
    let subtotal = cart.subtotal();
    let tax = subtotal * TAX_RATE;
    Totals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// The total snapshotted when checkout begins.
///
/// The confirmation shows this snapshot, not a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPayment {
    pub total: Decimal,
}

/// Where a checkout session currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    /// No checkout in progress.
    Idle,
    /// Checkout begun, no method chosen yet.
    MethodSelection { pending: PendingPayment },
    /// A method is chosen and its fields are being entered.
    FieldEntry {
        pending: PendingPayment,
        fields: PaymentFields,
    },
    /// Terminal: the payment went through and the cart was cleared. A new
    /// checkout session requires `begin_checkout` on a refilled cart.
    Confirmed {
        method: PaymentMethodKind,
        total: Decimal,
    },
}

/// Outcome of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The quantity was changed and persisted.
    Updated(u32),
    /// Decrementing from quantity 1 removes the line instead, and removal
    /// needs explicit confirmation: nothing was mutated. Confirm via
    /// [`CheckoutEngine::remove_line`].
    RemovalRequested,
}

/// What a confirmed payment hands back, for display and invoicing.
///
/// `lines` is the pre-clear snapshot of the cart.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub method: PaymentMethodKind,
    pub total: Decimal,
    pub lines: Vec<CartLine>,
}

/// The cart & checkout engine.
pub struct CheckoutEngine<'a> {
    repo: CartRepository<'a>,
    cart: Cart,
    state: CheckoutState,
}

impl<'a> CheckoutEngine<'a> {
    /// Restore the persisted cart and start an idle engine.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Repository` if the cart blob cannot be read.
    pub async fn load(store: &'a Store) -> Result<Self, CheckoutError> {
        let repo = CartRepository::new(store);
        let cart = repo.load().await?;
        Ok(Self {
            repo,
            cart,
            state: CheckoutState::Idle,
        })
    }

    /// The current cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The current checkout state.
    #[must_use]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The fields being entered, when a method is selected.
    #[must_use]
    pub fn payment_fields(&self) -> Option<&PaymentFields> {
        match &self.state {
            CheckoutState::FieldEntry { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// The cart's derived amounts.
    #[must_use]
    pub fn totals(&self) -> Totals {
        totals_for(&self.cart)
    }

    /// Append a drink to the cart as a new line at quantity 1.
    ///
    /// Always appends: adding the same drink twice produces two independent
    /// lines rather than incrementing the first. The unit price is resolved
    /// from the price table now and locked into the line.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Repository` if the updated cart cannot be
    /// persisted; the in-memory cart is left unchanged in that case.
    pub async fn add_item(&mut self, drink: &DrinkSummary) -> Result<LineId, CheckoutError> {
        let line = CartLine {
            line_id: LineId::generate(),
            drink_id: drink.id.clone(),
            name: drink.name.clone(),
            thumb: drink.thumb.clone(),
            price: pricing::price_for(&drink.id).amount,
            quantity: 1,
        };
        let line_id = line.line_id;

        let mut next = self.cart.clone();
        next.push(line);
        self.repo.save(&next).await?;
        self.cart = next;

        Ok(line_id)
    }

    /// Apply an integer delta to a line's quantity.
    ///
    /// A decrement at quantity 1 does not drop to 0: it degrades to a removal
    /// request and mutates nothing until the removal is confirmed. Otherwise
    /// the quantity becomes `max(1, quantity + delta)`; there is no upper
    /// bound.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UnknownLine` for an unknown line identity and
    /// `CheckoutError::Repository` if persisting fails (in-memory cart
    /// unchanged).
    pub async fn change_quantity(
        &mut self,
        line_id: LineId,
        delta: i64,
    ) -> Result<QuantityChange, CheckoutError> {
        let mut next = self.cart.clone();
        let Some(line) = next.line_mut(line_id) else {
            return Err(CheckoutError::UnknownLine(line_id));
        };

        if delta < 0 && line.quantity <= 1 {
            return Ok(QuantityChange::RemovalRequested);
        }

        let updated = i64::from(line.quantity).saturating_add(delta).max(1);
        line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        let quantity = line.quantity;

        self.repo.save(&next).await?;
        self.cart = next;

        Ok(QuantityChange::Updated(quantity))
    }

    /// Remove a line. This is the confirmed end of the removal flow; the
    /// front end must have asked the user first.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UnknownLine` for an unknown line identity and
    /// `CheckoutError::Repository` if persisting fails (in-memory cart
    /// unchanged).
    pub async fn remove_line(&mut self, line_id: LineId) -> Result<CartLine, CheckoutError> {
        let mut next = self.cart.clone();
        let Some(removed) = next.remove(line_id) else {
            return Err(CheckoutError::UnknownLine(line_id));
        };

        self.repo.save(&next).await?;
        self.cart = next;

        Ok(removed)
    }

    /// Begin a checkout session: snapshot the total and open method
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart (checkout is only
    /// offered when there is something to pay for) and
    /// `CheckoutError::InvalidState` when a session is already in progress.
    pub fn begin_checkout(&mut self) -> Result<PendingPayment, CheckoutError> {
        match self.state {
            CheckoutState::Idle | CheckoutState::Confirmed { .. } => {}
            _ => return Err(CheckoutError::InvalidState),
        }

        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let pending = PendingPayment {
            total: self.totals().total,
        };
        self.state = CheckoutState::MethodSelection { pending };
        Ok(pending)
    }

    /// Select (or switch to) a payment method.
    ///
    /// All method-specific fields are reset to blank, including when
    /// re-selecting the current method, so no stale value survives a switch.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidState` outside an active session.
    pub fn select_method(&mut self, method: PaymentMethodKind) -> Result<(), CheckoutError> {
        let pending = match &self.state {
            CheckoutState::MethodSelection { pending }
            | CheckoutState::FieldEntry { pending, .. } => *pending,
            _ => return Err(CheckoutError::InvalidState),
        };

        self.state = CheckoutState::FieldEntry {
            pending,
            fields: PaymentFields::blank(method),
        };
        Ok(())
    }

    /// Validate fields against the rules of their method without submitting.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`PaymentError`] rule.
    pub fn validate_payment(&self, fields: &PaymentFields) -> Result<(), PaymentError> {
        payment::validate(fields, Utc::now().date_naive())
    }

    /// Submit the payment: the terminal transition of the checkout session.
    ///
    /// On a validation failure the entered fields are kept for correction and
    /// nothing else changes. On success the cart is cleared in memory and in
    /// the store (the key is deleted, not emptied), the fields are discarded,
    /// and the session enters `Confirmed` carrying the method and the
    /// snapshotted total.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidState` outside field entry or when the
    /// submitted fields belong to a different method than the selected one,
    /// `CheckoutError::Payment` on the first failing validation rule, and
    /// `CheckoutError::Repository` if clearing the store fails (cart and
    /// session state unchanged).
    pub async fn submit_payment(&mut self, fields: PaymentFields) -> Result<Receipt, CheckoutError> {
        let CheckoutState::FieldEntry {
            pending,
            fields: entered,
        } = &mut self.state
        else {
            return Err(CheckoutError::InvalidState);
        };

        if fields.kind() != entered.kind() {
            return Err(CheckoutError::InvalidState);
        }

        // The submitted values replace the blanks; they persist for
        // correction if validation fails.
        *entered = fields;

        if let Err(violation) = payment::validate(entered, Utc::now().date_naive()) {
            return Err(CheckoutError::Payment(violation));
        }

        let method = entered.kind();
        let total = pending.total;

        let lines = self.cart.lines().to_vec();
        self.repo.clear().await?;
        self.cart = Cart::new();
        self.state = CheckoutState::Confirmed { method, total };

        Ok(Receipt {
            method,
            total,
            lines,
        })
    }

    /// Cancel the current checkout session and return to `Idle`.
    ///
    /// Never mutates the cart. From `Idle` this is a no-op; from `Confirmed`
    /// it just acknowledges the confirmation display.
    pub fn cancel_checkout(&mut self) {
        self.state = CheckoutState::Idle;
    }
}
