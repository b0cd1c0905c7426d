//! Fee schedule and local fee quoting
//!
//! The fee service publishes one entry per fee kind, either a percentage
//! rate or a fixed amount, optionally bounded. Quoting happens locally
//! against the fetched schedule.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::{AMOUNT_SCALE, MoneyError};

/// Fee categories charged on the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeKind {
    /// Charged on transfers between accounts
    Transfer,
    /// Charged on ATM withdrawals
    Withdrawal,
    /// Monthly account maintenance
    Maintenance,
}

impl FeeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeKind::Transfer => "transfer",
            FeeKind::Withdrawal => "withdrawal",
            FeeKind::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for FeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One fee schedule entry as published by the fee service.
///
/// `percentage` takes precedence over `fixed_amount` when both are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    #[serde(rename = "type")]
    pub kind: FeeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Decimal>,
}

/// Result of quoting a fee against an amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeQuote {
    pub amount: Decimal,
    pub fee: Decimal,
    pub total: Decimal,
}

/// The set of fee entries for an account
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeSchedule {
    fees: Vec<Fee>,
}

impl FeeSchedule {
    pub fn new(fees: Vec<Fee>) -> Self {
        Self { fees }
    }

    /// The entry for a kind, if the service published one.
    pub fn get(&self, kind: FeeKind) -> Option<&Fee> {
        self.fees.iter().find(|f| f.kind == kind)
    }

    pub fn entries(&self) -> &[Fee] {
        &self.fees
    }

    /// Quote the fee for an operation of `amount`.
    ///
    /// A kind with no schedule entry is free. Percentage fees round
    /// half-up to centavos and are clamped to the entry's bounds.
    /// Zero and negative amounts are rejected.
    pub fn quote(&self, kind: FeeKind, amount: Decimal) -> Result<FeeQuote, MoneyError> {
        if amount <= Decimal::ZERO {
            return Err(MoneyError::NotPositive);
        }

        let fee = match self.get(kind) {
            None => Decimal::ZERO,
            Some(entry) => {
                let mut fee = if let Some(rate) = entry.percentage {
                    (amount * rate / Decimal::ONE_HUNDRED)
                        .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
                } else {
                    entry.fixed_amount.unwrap_or(Decimal::ZERO)
                };
                if let Some(min) = entry.min_amount {
                    fee = fee.max(min);
                }
                if let Some(max) = entry.max_amount {
                    fee = fee.min(max);
                }
                fee
            }
        };

        Ok(FeeQuote {
            amount,
            fee,
            total: amount + fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn schedule() -> FeeSchedule {
        FeeSchedule::new(vec![
            Fee {
                kind: FeeKind::Transfer,
                percentage: Some(dec("1.5")),
                fixed_amount: None,
                min_amount: Some(dec("0.50")),
                max_amount: Some(dec("25.00")),
            },
            Fee {
                kind: FeeKind::Withdrawal,
                percentage: None,
                fixed_amount: Some(dec("4.90")),
                min_amount: None,
                max_amount: None,
            },
        ])
    }

    #[test]
    fn test_percentage_quote() {
        let quote = schedule().quote(FeeKind::Transfer, dec("200.00")).unwrap();
        assert_eq!(quote.fee, dec("3.00"));
        assert_eq!(quote.total, dec("203.00"));
    }

    #[test]
    fn test_percentage_clamped_to_bounds() {
        let s = schedule();
        // 1.5% of 10.00 = 0.15, below the 0.50 floor
        assert_eq!(s.quote(FeeKind::Transfer, dec("10.00")).unwrap().fee, dec("0.50"));
        // 1.5% of 10000.00 = 150.00, above the 25.00 cap
        assert_eq!(
            s.quote(FeeKind::Transfer, dec("10000.00")).unwrap().fee,
            dec("25.00")
        );
    }

    #[test]
    fn test_fixed_quote() {
        let quote = schedule().quote(FeeKind::Withdrawal, dec("50.00")).unwrap();
        assert_eq!(quote.fee, dec("4.90"));
        assert_eq!(quote.total, dec("54.90"));
    }

    #[test]
    fn test_unlisted_kind_is_free() {
        let quote = schedule().quote(FeeKind::Maintenance, dec("50.00")).unwrap();
        assert_eq!(quote.fee, Decimal::ZERO);
        assert_eq!(quote.total, dec("50.00"));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let s = schedule();
        assert_eq!(
            s.quote(FeeKind::Transfer, Decimal::ZERO),
            Err(MoneyError::NotPositive)
        );
        assert_eq!(
            s.quote(FeeKind::Transfer, dec("-1")),
            Err(MoneyError::NotPositive)
        );
    }

    #[test]
    fn test_fee_wire_shape() {
        let json = r#"{"type":"transfer","percentage":"1.5","minAmount":"0.50"}"#;
        let fee: Fee = serde_json::from_str(json).unwrap();
        assert_eq!(fee.kind, FeeKind::Transfer);
        assert_eq!(fee.percentage, Some(dec("1.5")));
        assert_eq!(fee.min_amount, Some(dec("0.50")));
        assert_eq!(fee.fixed_amount, None);
    }
}
