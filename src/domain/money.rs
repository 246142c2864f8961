use crate::error::{OrderError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Number of fractional digits shown when a price is rendered.
pub const DISPLAY_DECIMALS: u32 = 4;

/// Largest unit price a menu may list. Keeps order sums and tips far inside
/// `Decimal`'s range, so order arithmetic cannot overflow.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// A non-negative amount of the network's native token.
///
/// Wraps `rust_decimal::Decimal` so that order arithmetic never drifts the way
/// binary floating point would across repeated add/remove cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(OrderError::Configuration(format!(
                "price must not be negative, got {value}"
            )))
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Applies a percentage on top of this price: `self * (1 + percent / 100)`.
    pub fn with_percent(self, percent: u32) -> Self {
        Self(self.0 + self.0 * Decimal::new(i64::from(percent), 2))
    }

    /// Rounded form used only at render time. The stored value is untouched.
    pub fn display(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DISPLAY_DECIMALS);
        rounded.to_string()
    }

    /// Converts to the network's smallest denomination, truncating any
    /// sub-unit remainder.
    pub fn to_base_units(&self, decimals: u32) -> Result<u128> {
        let scale = 10u64
            .checked_pow(decimals)
            .ok_or_else(|| OrderError::PaymentFailed(format!("unsupported decimals {decimals}")))?;
        self.0
            .checked_mul(Decimal::from(scale))
            .and_then(|scaled| scaled.trunc().to_u128())
            .ok_or_else(|| {
                OrderError::PaymentFailed(format!("amount {} does not fit in base units", self.0))
            })
    }

    /// Inverse of [`Price::to_base_units`].
    pub fn from_base_units(units: u128, decimals: u32) -> Result<Self> {
        let units = i128::try_from(units)
            .map_err(|_| OrderError::PaymentFailed(format!("{units} base units out of range")))?;
        Decimal::try_from_i128_with_scale(units, decimals)
            .map(|value| Self(value.normalize()))
            .map_err(|e| OrderError::PaymentFailed(e.to_string()))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = OrderError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Price::new(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Price {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
