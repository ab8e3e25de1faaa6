//! Arbitrary-precision amounts.
//!
//! spec.md §3 / §9: balances, transaction amounts, and gas are "non-negative
//! integer of arbitrary precision, serialized as decimal string"; debit
//! arithmetic during replay (spec.md §4.5 step 4b) is signed and must not
//! wrap on underflow. `BigAmount` wraps `num_bigint::BigInt` so neither
//! constraint is at risk of silently falling back to a fixed-width integer.

use crate::errors::TypeError;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// An arbitrary-precision integer amount.
///
/// May be negative as an intermediate value during replay (a sender's
/// balance is debited before the post-condition `balance >= 0` is checked,
/// spec.md §4.5 steps 4b/4e); persisted balances are always constructed
/// through call sites that check non-negativity before writing to a store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BigAmount(BigInt);

impl BigAmount {
    /// The additive identity.
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    /// Parse a decimal string (optionally signed) into an amount.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        BigInt::from_str(value)
            .map(Self)
            .map_err(|_| TypeError::NotDecimal(value.to_string()))
    }

    /// Parse a decimal string that must represent a non-negative integer.
    ///
    /// Used for fields the wire format guarantees are unsigned (spec.md §3
    /// `amount`, `gas`, `contractGas`, `balance`).
    pub fn parse_non_negative(value: &str) -> Result<Self, TypeError> {
        let parsed = Self::parse(value)?;
        if parsed.is_negative() {
            return Err(TypeError::NotNonNegativeDecimal(value.to_string()));
        }
        Ok(parsed)
    }

    /// Construct directly from a `u64`, always non-negative.
    pub fn from_u64(value: u64) -> Self {
        Self(BigInt::from(value))
    }

    /// True if the amount is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// True if the amount is zero or positive.
    pub fn is_non_negative(&self) -> bool {
        !self.is_negative()
    }

    /// Render as the canonical decimal string used for serialization and for
    /// the canonical transaction encoding (spec.md §4.3).
    pub fn to_decimal_string(&self) -> String {
        self.0.to_string()
    }
}

impl Add for &BigAmount {
    type Output = BigAmount;
    fn add(self, rhs: Self) -> BigAmount {
        BigAmount(&self.0 + &rhs.0)
    }
}

impl Sub for &BigAmount {
    type Output = BigAmount;
    fn sub(self, rhs: Self) -> BigAmount {
        BigAmount(&self.0 - &rhs.0)
    }
}

impl fmt::Display for BigAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_string())
    }
}

impl Serialize for BigAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for BigAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BigAmount::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal() {
        assert_eq!(BigAmount::parse("100").unwrap().to_decimal_string(), "100");
    }

    #[test]
    fn rejects_non_decimal() {
        assert!(BigAmount::parse("abc").is_err());
    }

    #[test]
    fn rejects_negative_when_non_negative_required() {
        assert!(BigAmount::parse_non_negative("-1").is_err());
        assert!(BigAmount::parse_non_negative("0").is_ok());
    }

    #[test]
    fn debit_can_go_negative_without_wrapping() {
        let balance = BigAmount::from_u64(10);
        let spend = BigAmount::from_u64(200);
        let result = &balance - &spend;
        assert!(result.is_negative());
        assert_eq!(result.to_decimal_string(), "-190");
    }

    #[test]
    fn round_trips_through_serde() {
        let amount = BigAmount::parse("123456789012345678901234567890").unwrap();
        let encoded = bincode::serialize(&amount).unwrap();
        let decoded: BigAmount = bincode::deserialize(&encoded).unwrap();
        assert_eq!(amount, decoded);
    }
}
