//! Semantic unit types for soil-mix quantities
//!
//! The calculator works in two unit domains that never mix inside the ratio
//! math:
//! - Volume ingredients (humus and aeration) are measured in cubic feet
//! - Count ingredients (minerals and amendments) are measured in cups
//!
//! The two domains are linked only through fixed application rates
//! (cups per cubic foot of finished soil). The cup/cubic-foot conversion
//! factors below exist for reference and display; they are not part of any
//! recipe calculation.
//!
//! # Design
//! - `f64` throughout so two-decimal rounding is stable across the whole
//!   valid input range (0 to 10000)
//! - Total ordering via `Ord` (NaN sorts above every value)
//! - Constructors accept any value, including negatives. Out-of-range input
//!   is rejected by [`crate::validation`] before it reaches the engine.
//!
//! # Usage
//! ```
//! use soil_mix_core::core_types::units::{CubicFeet, Cups};
//!
//! let soil = CubicFeet::new(8.0);
//! assert_eq!(soil.to_string(), "8.00 CuFt");
//!
//! let cups: Cups = soil.to_cups();
//! assert!((*cups - 957.504).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, Div, Mul, Sub};

/// Cups in one cubic foot.
pub const CUPS_PER_CUBIC_FOOT: f64 = 119.688;

/// Cubic feet in one cup.
pub const CUBIC_FEET_PER_CUP: f64 = 0.00835;

/// Shared trait impls for the `f64` newtypes in this module.
macro_rules! impl_quantity_newtype {
    ($name:ident) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = $name;
            fn div(self, rhs: f64) -> $name {
                $name(self.0 / rhs)
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = $name>>(iter: I) -> $name {
                $name(iter.map(|v| v.0).sum())
            }
        }
    };
}

// ============================================================================
// VOLUME
// ============================================================================

/// Volume in cubic feet (CuFt)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct CubicFeet(f64);

impl_quantity_newtype!(CubicFeet);

impl CubicFeet {
    /// Zero volume
    pub const ZERO: CubicFeet = CubicFeet(0.0);

    /// Create a volume. No range check is applied here.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        CubicFeet(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to cups (reference conversion, 119.688 cups per CuFt)
    #[inline]
    #[must_use]
    pub fn to_cups(self) -> Cups {
        Cups(self.0 * CUPS_PER_CUBIC_FOOT)
    }
}

impl fmt::Display for CubicFeet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.0, Unit::CubicFeet.label())
    }
}

// ============================================================================
// COUNT
// ============================================================================

/// Count in cups
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Cups(f64);

impl_quantity_newtype!(Cups);

impl Cups {
    /// Zero cups
    pub const ZERO: Cups = Cups(0.0);

    /// Create a cup count. No range check is applied here.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Cups(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to cubic feet (reference conversion, 0.00835 CuFt per cup)
    #[inline]
    #[must_use]
    pub fn to_cubic_feet(self) -> CubicFeet {
        CubicFeet(self.0 * CUBIC_FEET_PER_CUP)
    }
}

impl fmt::Display for Cups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.0, Unit::Cups.label())
    }
}

// ============================================================================
// UNIT-TAGGED QUANTITY
// ============================================================================

/// Unit an ingredient is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Unit {
    CubicFeet,
    Cups,
}

impl Unit {
    /// Short label used by the input fields ("CuFt" / "Cups")
    pub const fn label(self) -> &'static str {
        match self {
            Unit::CubicFeet => "CuFt",
            Unit::Cups => "Cups",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value tagged with the unit it is measured in.
///
/// Used where any ingredient has to be addressed uniformly, regardless of
/// which unit domain it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    #[inline]
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// `None` for an exact zero; the calculator leaves such fields blank.
    pub fn non_zero(self) -> Option<Self> {
        (self.value != 0.0).then_some(self)
    }
}

impl From<CubicFeet> for Quantity {
    fn from(v: CubicFeet) -> Self {
        Quantity::new(v.0, Unit::CubicFeet)
    }
}

impl From<Cups> for Quantity {
    fn from(v: Cups) -> Self {
        Quantity::new(v.0, Unit::Cups)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit)
    }
}
