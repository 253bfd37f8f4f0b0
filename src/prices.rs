//! Prices

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Represents a price in pence/cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// A zero price.
    pub const ZERO: Price = Price::new(0);

    /// Creates a new Price
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Multiplies the price by a quantity, saturating at the maximum amount.
    pub fn times(self, quantity: u32) -> Self {
        Price::new(self.value.saturating_mul(u64::from(quantity)))
    }

    /// Adds another price, saturating at the maximum amount.
    pub fn plus(self, other: Price) -> Self {
        Price::new(self.value.saturating_add(other.value))
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price::new(value)
    }
}
