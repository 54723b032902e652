use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Maximum fractional digits the exchange accepts for an order field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Five,
    Eight,
}

impl Precision {
    pub const fn decimals(self) -> u32 {
        match self {
            Self::Five => 5,
            Self::Eight => 8,
        }
    }
}

/// An order parameter after clamping
///
/// `Unchanged` keeps the caller's number untouched, `Fixed` carries the
/// fixed-point rendering that is sent on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ClampedValue {
    Unchanged(f64),
    Fixed(String),
}

impl ClampedValue {
    /// Numeric value of the clamped parameter
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Unchanged(v) => *v,
            Self::Fixed(s) => s.parse().unwrap_or(f64::NAN),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged(_))
    }
}

impl fmt::Display for ClampedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged(v) => write!(f, "{}", v),
            Self::Fixed(s) => f.write_str(s),
        }
    }
}

/// Count of digits after the decimal point in the canonical rendering
fn fraction_digits(value: f64) -> usize {
    value
        .to_string()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
}

/// Fixed-point rendering with exactly `decimals` digits, ties away from zero
fn to_fixed(value: f64, decimals: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let mut rounded =
                exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(decimals);
            rounded.to_string()
        }
        // outside Decimal's range; such magnitudes carry no fractional digits anyway
        None => format!("{:.*}", decimals as usize, value),
    }
}

/// Clamp `value` to at most `precision` fractional digits
///
/// Values already within precision are returned as-is so no spurious
/// rounding reaches the exchange.
pub fn clamp(value: f64, precision: Precision) -> ClampedValue {
    let decimals = precision.decimals();
    if !value.is_finite() || fraction_digits(value) <= decimals as usize {
        return ClampedValue::Unchanged(value);
    }
    ClampedValue::Fixed(to_fixed(value, decimals))
}
