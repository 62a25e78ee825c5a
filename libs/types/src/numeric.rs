//! Fixed-point integer types for prices and quantities
//!
//! Prices are whole ticks and quantities are whole units. Book levels are
//! keyed by exact price equality, so floating point never enters the engine.
//! `rust_decimal` is only used at the boundary, converting human-readable
//! decimals to ticks at a fixed scale.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::errors::NumericError;

/// Largest decimal scale accepted for tick conversion (10^18 fits in i64)
pub const MAX_TICK_SCALE: u32 = 18;

/// Limit price in integer ticks
///
/// Signed so that a non-positive price can be represented and rejected at
/// submission instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub const fn ticks(&self) -> i64 {
        self.0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Convert a decimal price to ticks, where one tick is `10^-scale`
    ///
    /// Fails if the value is not an exact multiple of a tick or does not
    /// fit the tick range.
    pub fn from_decimal(value: Decimal, scale: u32) -> Result<Self, NumericError> {
        let multiplier = tick_multiplier(scale)?;
        let scaled = value
            .checked_mul(multiplier)
            .ok_or_else(|| NumericError::Overflow(value.to_string()))?;

        if !scaled.fract().is_zero() {
            return Err(NumericError::NotRepresentable {
                value: value.to_string(),
                scale,
            });
        }

        scaled
            .to_i64()
            .map(Self)
            .ok_or_else(|| NumericError::Overflow(value.to_string()))
    }

    /// Render the tick count as a decimal at the given scale
    pub fn to_decimal(&self, scale: u32) -> Result<Decimal, NumericError> {
        if scale > MAX_TICK_SCALE {
            return Err(NumericError::InvalidScale(scale));
        }
        Decimal::try_new(self.0, scale).map_err(|_| NumericError::InvalidScale(scale))
    }

    /// Signed distance `self - other` in ticks
    pub fn ticks_above(&self, other: Price) -> i64 {
        self.0.saturating_sub(other.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn tick_multiplier(scale: u32) -> Result<Decimal, NumericError> {
    if scale > MAX_TICK_SCALE {
        return Err(NumericError::InvalidScale(scale));
    }
    Ok(Decimal::from(10i64.pow(scale)))
}

/// Order quantity in whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Sum of two quantities, or None if it does not fit in a u64
    pub const fn checked_add(self, rhs: Quantity) -> Option<Quantity> {
        match self.0.checked_add(rhs.0) {
            Some(units) => Some(Quantity(units)),
            None => None,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Quantity {
    fn from(units: u64) -> Self {
        Self(units)
    }
}

impl Add for Quantity {
    type Output = Quantity;

    /// # Panics
    /// Panics if the sum exceeds `u64::MAX`, in release builds too
    fn add(self, rhs: Quantity) -> Quantity {
        match self.checked_add(rhs) {
            Some(sum) => sum,
            None => panic!("Quantity addition overflow"),
        }
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Quantity) {
        *self = *self + rhs;
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    /// # Panics
    /// Panics if `rhs` exceeds `self`
    fn sub(self, rhs: Quantity) -> Quantity {
        assert!(rhs.0 <= self.0, "Quantity subtraction underflow");
        Quantity(self.0 - rhs.0)
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Quantity) {
        *self = *self - rhs;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Quantity {
        iter.fold(Quantity::ZERO, Add::add)
    }
}
