//! Transfer draft collection and validation
//!
//! [`DraftFields`] is the raw form input; [`TransferDraft`] is the validated
//! value held across the confirmation step. Validation is advisory on the
//! balance side: the service re-checks everything authoritatively.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::identity::{Cpf, CpfError};
use crate::money::{self, MoneyError};

/// Upper bound on the free-text description
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Raw entry-step form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftFields {
    pub recipient_cpf: String,
    pub amount: String,
    pub description: String,
}

/// Field-scoped validation errors for the entry form
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("recipient CPF is required")]
    MissingRecipient,

    #[error("invalid recipient CPF: {0}")]
    InvalidRecipient(CpfError),

    #[error("amount is required")]
    MissingAmount,

    #[error("invalid amount: {0}")]
    InvalidAmount(MoneyError),

    #[error("amount {amount} exceeds the available balance {balance}")]
    OverBalance { amount: Decimal, balance: Decimal },

    #[error("description must be at most {MAX_DESCRIPTION_LEN} characters, got {0}")]
    DescriptionTooLong(usize),
}

impl DraftError {
    /// The form field this error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            DraftError::MissingRecipient | DraftError::InvalidRecipient(_) => "recipientCpf",
            DraftError::MissingAmount
            | DraftError::InvalidAmount(_)
            | DraftError::OverBalance { .. } => "amount",
            DraftError::DescriptionTooLong(_) => "description",
        }
    }
}

/// A validated transfer, immutable while the user reviews it.
///
/// Fields are private: a draft can only exist by passing validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferDraft {
    recipient: Cpf,
    amount: Decimal,
    description: Option<String>,
}

impl TransferDraft {
    /// Validate raw form input against the advisory balance.
    ///
    /// The balance bound is a client-side guard only; a stale value here
    /// is caught by the service at submit time.
    pub fn from_fields(fields: &DraftFields, balance: Decimal) -> Result<Self, DraftError> {
        let recipient_input = fields.recipient_cpf.trim();
        if recipient_input.is_empty() {
            return Err(DraftError::MissingRecipient);
        }
        let recipient = Cpf::parse(recipient_input).map_err(DraftError::InvalidRecipient)?;

        let amount_input = fields.amount.trim();
        if amount_input.is_empty() {
            return Err(DraftError::MissingAmount);
        }
        let amount = money::parse_brl(amount_input).map_err(DraftError::InvalidAmount)?;
        if amount > balance {
            return Err(DraftError::OverBalance { amount, balance });
        }

        let description = fields.description.trim();
        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(DraftError::DescriptionTooLong(len));
        }
        let description = if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        };

        Ok(Self {
            recipient,
            amount,
            description,
        })
    }

    pub fn recipient(&self) -> &Cpf {
        &self.recipient
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn fields(cpf: &str, amount: &str, description: &str) -> DraftFields {
        DraftFields {
            recipient_cpf: cpf.to_string(),
            amount: amount.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_valid_draft() {
        let draft =
            TransferDraft::from_fields(&fields("529.982.247-25", "100.00", "rent"), dec("500"))
                .unwrap();
        assert_eq!(draft.recipient().as_str(), "52998224725");
        assert_eq!(draft.amount(), dec("100.00"));
        assert_eq!(draft.description(), Some("rent"));
    }

    #[test]
    fn test_empty_description_becomes_none() {
        let draft =
            TransferDraft::from_fields(&fields("52998224725", "1,00", "  "), dec("10")).unwrap();
        assert_eq!(draft.description(), None);
    }

    #[test]
    fn test_missing_recipient() {
        let err = TransferDraft::from_fields(&fields("", "10", ""), dec("100")).unwrap_err();
        assert_eq!(err, DraftError::MissingRecipient);
        assert_eq!(err.field(), "recipientCpf");
    }

    #[test]
    fn test_invalid_recipient() {
        let err =
            TransferDraft::from_fields(&fields("111.111.111-11", "10", ""), dec("100")).unwrap_err();
        assert!(matches!(err, DraftError::InvalidRecipient(_)));
        assert_eq!(err.field(), "recipientCpf");
    }

    #[test]
    fn test_zero_and_negative_amounts_rejected() {
        for bad in ["0", "0,00", "-10"] {
            let err =
                TransferDraft::from_fields(&fields("52998224725", bad, ""), dec("100")).unwrap_err();
            assert_eq!(err, DraftError::InvalidAmount(MoneyError::NotPositive));
            assert_eq!(err.field(), "amount");
        }
    }

    #[test]
    fn test_missing_amount() {
        let err =
            TransferDraft::from_fields(&fields("52998224725", "  ", ""), dec("100")).unwrap_err();
        assert_eq!(err, DraftError::MissingAmount);
    }

    #[test]
    fn test_amount_over_balance() {
        let err =
            TransferDraft::from_fields(&fields("52998224725", "150", ""), dec("100")).unwrap_err();
        assert_eq!(
            err,
            DraftError::OverBalance {
                amount: dec("150.00"),
                balance: dec("100"),
            }
        );
    }

    #[test]
    fn test_amount_equal_to_balance_allowed() {
        let draft =
            TransferDraft::from_fields(&fields("52998224725", "100", ""), dec("100")).unwrap();
        assert_eq!(draft.amount(), dec("100.00"));
    }

    #[test]
    fn test_description_bound() {
        let long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        let err =
            TransferDraft::from_fields(&fields("52998224725", "10", &long), dec("100")).unwrap_err();
        assert_eq!(err, DraftError::DescriptionTooLong(MAX_DESCRIPTION_LEN + 1));

        let max = "x".repeat(MAX_DESCRIPTION_LEN);
        assert!(TransferDraft::from_fields(&fields("52998224725", "10", &max), dec("100")).is_ok());
    }
}
