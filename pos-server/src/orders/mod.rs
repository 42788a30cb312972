//! Order lifecycle with stock reconciliation
//!
//! Creating an order moves stock from `remaining_items` to `sold_items` for
//! every line; deleting it moves the same quantities back. Each operation is
//! a single unit of work.

mod error;
mod service;

pub use error::OrderError;
pub use service::{OrderService, validate};

use std::fmt;
use std::str::FromStr;

/// How client-supplied line subtotals are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubtotalPolicy {
    /// Sum the subtotals as given
    #[default]
    Trust,
    /// Reject lines whose subtotal differs from `quantity * unit_price`
    Verify,
}

/// Whether an order may sell more than the remaining stock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StockPolicy {
    /// No availability guard; `remaining_items` may go negative
    #[default]
    AllowNegative,
    /// Fail the order when a line asks for more than is left
    RejectInsufficient,
}

/// Order creation policies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderPolicy {
    pub subtotal: SubtotalPolicy,
    pub stock: StockPolicy,
}

/// Unknown policy name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPolicy {
    pub name: &'static str,
    pub value: String,
}

impl fmt::Display for InvalidPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.name, self.value)
    }
}

impl std::error::Error for InvalidPolicy {}

impl FromStr for SubtotalPolicy {
    type Err = InvalidPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trust" => Ok(Self::Trust),
            "verify" => Ok(Self::Verify),
            _ => Err(InvalidPolicy {
                name: "SUBTOTAL_POLICY",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for StockPolicy {
    type Err = InvalidPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow_negative" => Ok(Self::AllowNegative),
            "reject_insufficient" => Ok(Self::RejectInsufficient),
            _ => Err(InvalidPolicy {
                name: "STOCK_POLICY",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policies() {
        assert_eq!("verify".parse::<SubtotalPolicy>(), Ok(SubtotalPolicy::Verify));
        assert_eq!(" Trust ".parse::<SubtotalPolicy>(), Ok(SubtotalPolicy::Trust));
        assert_eq!(
            "reject_insufficient".parse::<StockPolicy>(),
            Ok(StockPolicy::RejectInsufficient)
        );
        assert_eq!(
            "allow_negative".parse::<StockPolicy>(),
            Ok(StockPolicy::AllowNegative)
        );
    }

    #[test]
    fn test_parse_unknown_policy() {
        let err = "sometimes".parse::<StockPolicy>().unwrap_err();
        assert_eq!(err.to_string(), "invalid STOCK_POLICY: \"sometimes\"");
        assert!("".parse::<SubtotalPolicy>().is_err());
    }
}
