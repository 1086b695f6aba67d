//! Core value types for transactions.
//!
//! Amounts are unsigned 128-bit integers in the smallest unit (10^-24 of a
//! whole token). No floating point anywhere near balances: decimal strings
//! are parsed digit by digit.

use std::fmt;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::{TOKEN_DECIMALS, YOCTO_PER_TOKEN};

/// Account identifier, e.g. `"alice.testnet"`. Validation is the node's job.
pub type AccountId = String;

/// Gas units.
pub type Gas = u64;

/// Per-access-key transaction counter.
pub type Nonce = u64;

/// Errors from parsing human-entered amounts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BalanceError {
    #[error("invalid amount {0:?}: expected decimal digits")]
    Invalid(String),

    #[error("amount {0:?} has more than {max} fractional digits", max = TOKEN_DECIMALS)]
    TooPrecise(String),

    #[error("amount {0:?} does not fit in 128 bits of smallest units")]
    Overflow(String),
}

// ---------------------------------------------------------------------------
// Balance
// ---------------------------------------------------------------------------

/// An amount of the native token in smallest units.
///
/// Borsh layout is a 16-byte little-endian `u128`. JSON layout is a decimal
/// string of smallest units, because JSON numbers cannot carry 128 bits.
/// `Display` and `FromStr` use the same smallest-unit text; whole-token
/// amounts go through [`Balance::from_token_str`] and
/// [`Balance::to_token_string`].
///
/// # Examples
///
/// ```
/// use txkit::transaction::types::Balance;
///
/// let one = Balance::from_tokens(1);
/// let half = Balance::from_token_str("0.5").unwrap();
/// assert_eq!(one.as_yocto(), 2 * half.as_yocto());
///
/// let yocto: Balance = "1000".parse().unwrap();
/// assert_eq!(yocto.as_yocto(), 1000);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct Balance(u128);

impl Balance {
    /// Zero.
    pub const ZERO: Balance = Balance(0);

    /// Wraps an amount already expressed in smallest units.
    pub const fn from_yocto(yocto: u128) -> Self {
        Self(yocto)
    }

    /// Converts whole tokens to smallest units. `u32` keeps this infallible;
    /// parse a decimal string for larger amounts.
    pub const fn from_tokens(tokens: u32) -> Self {
        Self(tokens as u128 * YOCTO_PER_TOKEN)
    }

    /// Parses a whole-token decimal string (`"10"`, `"0.25"`, `".5"`) into
    /// smallest units without rounding.
    pub fn from_token_str(s: &str) -> Result<Self, BalanceError> {
        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(BalanceError::Invalid(s.to_string()));
        }
        if frac.len() > TOKEN_DECIMALS as usize {
            return Err(BalanceError::TooPrecise(s.to_string()));
        }

        let overflow = || BalanceError::Overflow(s.to_string());
        let whole_units = if whole.is_empty() {
            0
        } else {
            whole.parse::<u128>().map_err(|_| overflow())?
        };
        let frac_units = if frac.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", frac, width = TOKEN_DECIMALS as usize);
            padded.parse::<u128>().map_err(|_| overflow())?
        };

        whole_units
            .checked_mul(YOCTO_PER_TOKEN)
            .and_then(|units| units.checked_add(frac_units))
            .map(Self)
            .ok_or_else(overflow)
    }

    /// The amount in smallest units.
    pub const fn as_yocto(&self) -> u128 {
        self.0
    }

    /// Returns `true` for a zero amount.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whole-token decimal rendering with trailing zeros trimmed,
    /// e.g. `1500000000000000000000000` becomes `"1.5"`.
    pub fn to_token_string(&self) -> String {
        let whole = self.0 / YOCTO_PER_TOKEN;
        let frac = self.0 % YOCTO_PER_TOKEN;
        if frac == 0 {
            return whole.to_string();
        }
        let digits = format!("{:0>width$}", frac, width = TOKEN_DECIMALS as usize);
        format!("{}.{}", whole, digits.trim_end_matches('0'))
    }
}

impl FromStr for Balance {
    type Err = BalanceError;

    /// Parses an amount in smallest units, the same text `Display` writes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BalanceError::Invalid(s.to_string()));
        }
        s.parse::<u128>()
            .map(Self)
            .map_err(|_| BalanceError::Overflow(s.to_string()))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Balance {
    fn from(yocto: u128) -> Self {
        Self(yocto)
    }
}

impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Balance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
