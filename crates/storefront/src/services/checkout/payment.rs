//! Payment method fields and validation.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use cocktail_haven_core::{Email, PaymentMethodKind};

use super::error::PaymentError;

static CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{16}$").expect("card number pattern"));
static CVV: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3}$").expect("cvv pattern"));
static BANK_ACCOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10,}$").expect("bank account pattern"));

/// Entry cap on the bank account number.
const BANK_ACCOUNT_MAX_DIGITS: usize = 20;

/// The method-specific fields of a checkout session.
///
/// Transient: created blank when a method is selected, discarded after
/// submission or cancellation. Switching methods always starts from
/// [`PaymentFields::blank`], so no value leaks across methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentFields {
    CreditCard {
        /// Exactly 16 decimal digits when valid.
        card_number: String,
        /// `MM/YYYY`, chosen no earlier than the current month.
        expiration_date: Option<String>,
        /// Exactly 3 decimal digits when valid.
        cvv: String,
    },
    PayPal {
        email: String,
    },
    BankTransfer {
        /// 10 to 20 decimal digits when valid.
        account_number: String,
    },
}

impl PaymentFields {
    /// Blank fields for the given method.
    #[must_use]
    pub const fn blank(kind: PaymentMethodKind) -> Self {
        match kind {
            PaymentMethodKind::CreditCard => Self::CreditCard {
                card_number: String::new(),
                expiration_date: None,
                cvv: String::new(),
            },
            PaymentMethodKind::PayPal => Self::PayPal {
                email: String::new(),
            },
            PaymentMethodKind::BankTransfer => Self::BankTransfer {
                account_number: String::new(),
            },
        }
    }

    /// Which method these fields belong to.
    #[must_use]
    pub const fn kind(&self) -> PaymentMethodKind {
        match self {
            Self::CreditCard { .. } => PaymentMethodKind::CreditCard,
            Self::PayPal { .. } => PaymentMethodKind::PayPal,
            Self::BankTransfer { .. } => PaymentMethodKind::BankTransfer,
        }
    }
}

/// Validate payment fields against the rules of their method.
///
/// Rules are checked in form order and the first violation is returned alone.
///
/// # Errors
///
/// Returns the first failing [`PaymentError`] rule.
pub fn validate(fields: &PaymentFields, today: NaiveDate) -> Result<(), PaymentError> {
    match fields {
        PaymentFields::CreditCard {
            card_number,
            expiration_date,
            cvv,
        } => {
            if !CARD_NUMBER.is_match(card_number) {
                return Err(PaymentError::InvalidCardNumber);
            }

            let expiration = expiration_date
                .as_deref()
                .ok_or(PaymentError::MissingExpirationDate)?;
            let (month, year) = parse_expiration(expiration)?;
            let current_year = u32::try_from(today.year()).unwrap_or(0);
            if (year, month) < (current_year, today.month()) {
                return Err(PaymentError::ExpiredCard);
            }

            if !CVV.is_match(cvv) {
                return Err(PaymentError::InvalidCvv);
            }
            Ok(())
        }
        PaymentFields::PayPal { email } => {
            Email::parse(email).map_err(|_| PaymentError::InvalidPaypalEmail)?;
            Ok(())
        }
        PaymentFields::BankTransfer { account_number } => {
            if account_number.len() > BANK_ACCOUNT_MAX_DIGITS {
                return Err(PaymentError::BankAccountTooLong);
            }
            if !BANK_ACCOUNT.is_match(account_number) {
                return Err(PaymentError::InvalidBankAccount);
            }
            Ok(())
        }
    }
}

/// Parse an `MM/YYYY` expiration into `(month, year)`.
///
/// A single-digit month is accepted; date pickers commonly format September
/// as `9/2026`.
fn parse_expiration(raw: &str) -> Result<(u32, u32), PaymentError> {
    let (month, year) = raw
        .split_once('/')
        .ok_or(PaymentError::MalformedExpirationDate)?;

    let month: u32 = month
        .parse()
        .map_err(|_| PaymentError::MalformedExpirationDate)?;
    if !(1..=12).contains(&month) {
        return Err(PaymentError::MalformedExpirationDate);
    }

    if year.len() != 4 {
        return Err(PaymentError::MalformedExpirationDate);
    }
    let year: u32 = year
        .parse()
        .map_err(|_| PaymentError::MalformedExpirationDate)?;

    Ok((month, year))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
    }

    fn valid_card() -> PaymentFields {
        PaymentFields::CreditCard {
            card_number: "4242424242424242".to_string(),
            expiration_date: Some("12/2028".to_string()),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn test_valid_card_passes() {
        assert!(validate(&valid_card(), today()).is_ok());
    }

    #[test]
    fn test_card_number_must_be_16_digits() {
        let check = |number: &str| {
            let fields = PaymentFields::CreditCard {
                card_number: number.to_string(),
                expiration_date: Some("12/2028".to_string()),
                cvv: "123".to_string(),
            };
            validate(&fields, today())
        };

        assert_eq!(check("123"), Err(PaymentError::InvalidCardNumber));
        assert_eq!(
            check("42424242424242424"), // 17 digits
            Err(PaymentError::InvalidCardNumber)
        );
        assert_eq!(
            check("4242-4242-4242-4242"),
            Err(PaymentError::InvalidCardNumber)
        );
        assert!(check("4242424242424242").is_ok());
    }

    #[test]
    fn test_card_requires_expiration_date() {
        let fields = PaymentFields::CreditCard {
            card_number: "4242424242424242".to_string(),
            expiration_date: None,
            cvv: "123".to_string(),
        };
        assert_eq!(
            validate(&fields, today()),
            Err(PaymentError::MissingExpirationDate)
        );
    }

    #[test]
    fn test_expiration_current_month_is_valid() {
        let fields = PaymentFields::CreditCard {
            card_number: "4242424242424242".to_string(),
            expiration_date: Some("8/2026".to_string()),
            cvv: "123".to_string(),
        };
        assert!(validate(&fields, today()).is_ok());
    }

    #[test]
    fn test_expiration_previous_month_is_expired() {
        let fields = PaymentFields::CreditCard {
            card_number: "4242424242424242".to_string(),
            expiration_date: Some("7/2026".to_string()),
            cvv: "123".to_string(),
        };
        assert_eq!(validate(&fields, today()), Err(PaymentError::ExpiredCard));
    }

    #[test]
    fn test_expiration_format_errors() {
        for raw in ["2028-12", "13/2028", "12/28", "december/2028", "12/"] {
            let fields = PaymentFields::CreditCard {
                card_number: "4242424242424242".to_string(),
                expiration_date: Some(raw.to_string()),
                cvv: "123".to_string(),
            };
            assert_eq!(
                validate(&fields, today()),
                Err(PaymentError::MalformedExpirationDate),
                "expected {raw} to be malformed"
            );
        }
    }

    #[test]
    fn test_cvv_must_be_3_digits() {
        let fields = PaymentFields::CreditCard {
            card_number: "4242424242424242".to_string(),
            expiration_date: Some("12/2028".to_string()),
            cvv: "12".to_string(),
        };
        assert_eq!(validate(&fields, today()), Err(PaymentError::InvalidCvv));
    }

    #[test]
    fn test_card_reports_first_violation_only() {
        // Both the card number and the CVV are wrong; only the card number
        // is reported.
        let fields = PaymentFields::CreditCard {
            card_number: "123".to_string(),
            expiration_date: None,
            cvv: "1".to_string(),
        };
        assert_eq!(
            validate(&fields, today()),
            Err(PaymentError::InvalidCardNumber)
        );
    }

    #[test]
    fn test_paypal_email() {
        let valid = PaymentFields::PayPal {
            email: "ana@example.com".to_string(),
        };
        assert!(validate(&valid, today()).is_ok());

        let invalid = PaymentFields::PayPal {
            email: "not-an-email".to_string(),
        };
        assert_eq!(
            validate(&invalid, today()),
            Err(PaymentError::InvalidPaypalEmail)
        );
    }

    #[test]
    fn test_bank_account_bounds() {
        let check = |digits: &str| {
            validate(
                &PaymentFields::BankTransfer {
                    account_number: digits.to_string(),
                },
                today(),
            )
        };

        assert_eq!(check("123456789"), Err(PaymentError::InvalidBankAccount));
        assert!(check("1234567890").is_ok());
        assert!(check("12345678901234567890").is_ok());
        assert_eq!(
            check("123456789012345678901"),
            Err(PaymentError::BankAccountTooLong)
        );
        assert_eq!(check("12345abcde"), Err(PaymentError::InvalidBankAccount));
    }

    #[test]
    fn test_blank_fields_match_their_kind() {
        for kind in PaymentMethodKind::ALL {
            assert_eq!(PaymentFields::blank(kind).kind(), kind);
        }
    }
}
