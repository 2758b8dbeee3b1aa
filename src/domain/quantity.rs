//! Numeric coercion for loosely-typed document fields.
//!
//! Inventory documents are written by client apps and migration scripts, so
//! `stock` and `stockThreshold` may be missing, strings, or garbage. Every
//! field read goes through [`Quantity::coerce`], which either yields a finite
//! number or [`Quantity::Unknown`].

use std::fmt;

use serde_json::Value;

/// A numeric field value after coercion.
///
/// `Value` always holds a finite number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    /// Absent, null, non-numeric, or not finite.
    Unknown,
    /// A finite number.
    Value(f64),
}

impl Quantity {
    /// Coerce an optional JSON field value.
    ///
    /// Numbers pass through; strings are trimmed and parsed. Everything
    /// else, including empty strings and non-finite results, is `Unknown`.
    #[must_use]
    pub fn coerce(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Unknown, Self::from_f64),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Self::Unknown;
                }
                trimmed
                    .parse::<f64>()
                    .map_or(Self::Unknown, Self::from_f64)
            }
            _ => Self::Unknown,
        }
    }

    /// Wrap a raw float, mapping NaN and infinities to `Unknown`.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Value(value)
        } else {
            Self::Unknown
        }
    }

    /// The finite value, if known.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.write_str(&format_number(*v)),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Render a number the way it appears in alert text and push payloads.
///
/// Integral values print without a fractional part (`10`, not `10.0`).
/// Magnitudes of `1e21` and above, or below `1e-6`, switch to exponent form
/// with a signed exponent (`1e+21`, `1.5e-7`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Collapses -0 as well.
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{value:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    format!("{value}")
}
