//! Stock adjustment policy.

use serde::{Deserialize, Serialize};

/// What placement does when a variant has less stock than the ordered
/// quantity.
///
/// Stock is adjusted optimistically at order-creation time (there is no
/// reservation system), so the decrement is the only point where
/// insufficiency can be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Reject the order with an insufficient-stock error; stock never goes
    /// negative.
    #[default]
    Reject,
    /// Accept the order and let stock go negative (backorder).
    Backorder,
}

impl StockPolicy {
    /// Stored/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Backorder => "backorder",
        }
    }
}

impl std::fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(Self::Reject),
            "backorder" => Ok(Self::Backorder),
            _ => Err(format!("invalid stock policy: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse() {
        assert_eq!(StockPolicy::from_str("reject"), Ok(StockPolicy::Reject));
        assert_eq!(
            StockPolicy::from_str("backorder"),
            Ok(StockPolicy::Backorder)
        );
        assert!(StockPolicy::from_str("allow").is_err());
    }

    #[test]
    fn test_default_rejects() {
        assert_eq!(StockPolicy::default(), StockPolicy::Reject);
    }
}
