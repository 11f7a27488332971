//! Payment method enumeration.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of supported payment methods.
///
/// Each method carries its own field set during checkout (card number, PayPal
/// email, bank account number); this enum is only the selector shared between
/// the checkout engine and the front end's method picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    CreditCard,
    PayPal,
    BankTransfer,
}

impl PaymentMethodKind {
    /// All methods, in picker display order.
    pub const ALL: [Self; 3] = [Self::CreditCard, Self::PayPal, Self::BankTransfer];

    /// Human-readable label shown in pickers and confirmations.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::PayPal => "PayPal",
            Self::BankTransfer => "Bank Transfer",
        }
    }
}

impl fmt::Display for PaymentMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error parsing a payment method name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown payment method: {0} (expected credit-card, paypal, or bank-transfer)")]
pub struct ParsePaymentMethodError(String);

impl std::str::FromStr for PaymentMethodKind {
    type Err = ParsePaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "credit-card" | "credit_card" | "card" => Ok(Self::CreditCard),
            "paypal" => Ok(Self::PayPal),
            "bank-transfer" | "bank_transfer" | "bank" => Ok(Self::BankTransfer),
            other => Err(ParsePaymentMethodError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(PaymentMethodKind::CreditCard.label(), "Credit Card");
        assert_eq!(PaymentMethodKind::PayPal.label(), "PayPal");
        assert_eq!(PaymentMethodKind::BankTransfer.label(), "Bank Transfer");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "credit-card".parse::<PaymentMethodKind>().unwrap(),
            PaymentMethodKind::CreditCard
        );
        assert_eq!(
            "paypal".parse::<PaymentMethodKind>().unwrap(),
            PaymentMethodKind::PayPal
        );
        assert_eq!(
            "bank".parse::<PaymentMethodKind>().unwrap(),
            PaymentMethodKind::BankTransfer
        );
        assert!("venmo".parse::<PaymentMethodKind>().is_err());
    }

    #[test]
    fn test_all_order_matches_picker() {
        assert_eq!(
            PaymentMethodKind::ALL,
            [
                PaymentMethodKind::CreditCard,
                PaymentMethodKind::PayPal,
                PaymentMethodKind::BankTransfer,
            ]
        );
    }
}
