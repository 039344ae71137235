//! Strongly-typed ID wrappers for all entity types
//!
//! The API hands out integer primary keys. Wrapping them keeps a wallet id
//! from being passed where a category id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw server id
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw server id
            pub const fn get(&self) -> i64 {
                self.0
            }

            /// Short label used in tables, e.g. `cat-12`
            pub fn label(&self) -> String {
                format!("{}{}", $display_prefix, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(WalletId, "wal-");
define_id!(BudgetId, "bud-");
define_id!(UserId, "usr-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw_number() {
        let id = WalletId::new(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(id.label(), "wal-7");
    }

    #[test]
    fn test_id_parse_accepts_prefix() {
        assert_eq!("12".parse::<CategoryId>().unwrap(), CategoryId::new(12));
        assert_eq!("cat-12".parse::<CategoryId>().unwrap(), CategoryId::new(12));
        assert!("cat-x".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_integer() {
        let json = serde_json::to_string(&BudgetId::new(3)).unwrap();
        assert_eq!(json, "3");
        let id: TransactionId = serde_json::from_str("42").unwrap();
        assert_eq!(id.get(), 42);
    }
}
