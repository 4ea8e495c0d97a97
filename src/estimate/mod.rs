//! Death-estimate parsing and formatting
//!
//! Casualty tables rarely agree on a single number. A country's losses are
//! written as an exact count (`"30,000"`), an explicit range
//! (`"20,000-35,000"`), a shorthand range that drops the trailing zeros on
//! the left side (`"3-4,000,000"`), or a marker that no figure is known
//! (`"--"`). This module turns that free text into numeric [`Bounds`].
//!
//! - [`range`]: the text grammar and its [`ParseError`]s
//! - [`label`]: thousands grouping and `"low to high"` display labels

pub mod label;
pub mod range;

pub use label::{format_range, group_thousands};
pub use range::{parse, ParseError};

/// An inclusive `(low, high)` estimate with `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub low: f64,
    pub high: f64,
}

impl Bounds {
    /// Build bounds from two values in any order.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// A single exact count.
    pub fn exact(value: f64) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    pub fn is_exact(&self) -> bool {
        self.low == self.high
    }

    /// Multiply both ends by the same factor.
    ///
    /// Factors are expected to be positive, so the ordering is kept.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.low * factor, self.high * factor)
    }

    /// Human-readable label, see [`format_range`].
    pub fn label(&self) -> String {
        format_range(Some(self.low), Some(self.high))
    }
}
