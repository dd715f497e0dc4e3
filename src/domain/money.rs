//! Fixed-point squad currency.
//!
//! Costs arrive as integer tenths of £1m (`now_cost = 55` is £5.5m). Budgets
//! are configured in millions and truncated to the same unit before solving.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Player cost or budget in tenths of £1m.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cost(i64);

impl Cost {
    pub const ZERO: Self = Self(0);

    /// Create from raw tenths.
    #[must_use]
    pub const fn from_tenths(tenths: i64) -> Self {
        Self(tenths)
    }

    /// Convert a budget in millions, truncating below one tenth.
    ///
    /// Returns `None` when the value does not fit the fixed-point range.
    #[must_use]
    pub fn from_millions(millions: Decimal) -> Option<Self> {
        millions.checked_mul(Decimal::TEN)?.trunc().to_i64().map(Self)
    }

    #[must_use]
    pub const fn tenths(self) -> i64 {
        self.0
    }

    /// Value in millions.
    #[must_use]
    pub fn millions(self) -> Decimal {
        Decimal::new(self.0, 1)
    }
}

impl Add for Cost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{}m", self.millions())
    }
}
