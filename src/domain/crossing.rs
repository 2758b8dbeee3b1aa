//! Threshold-crossing evaluation.
//!
//! A crossing is a transition from at/above the threshold to strictly below
//! it between two consecutive observations. Updates that stay below the
//! threshold do not cross again, so a product alerts once per dip.
//!
//! An unknown prior stock (new document, unreadable previous state) counts
//! as above the threshold: the first observation below it still alerts.

use super::outcome::SkipReason;
use super::quantity::Quantity;

/// Result of evaluating one before/after observation pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Stock crossed below the threshold.
    Crossed {
        /// Current stock.
        stock: f64,
        /// Resolved threshold.
        threshold: f64,
    },
    /// Nothing to do.
    Skip(SkipReason),
}

impl Verdict {
    #[must_use]
    pub const fn is_crossed(&self) -> bool {
        matches!(self, Self::Crossed { .. })
    }
}

/// Evaluate a change against a threshold.
///
/// Total over all inputs: an unknown threshold or unknown current stock is a
/// skip, never an error.
#[must_use]
pub fn evaluate(before: Quantity, after: Quantity, threshold: Quantity) -> Verdict {
    let Quantity::Value(threshold) = threshold else {
        return Verdict::Skip(SkipReason::InvalidThreshold);
    };
    let Quantity::Value(stock) = after else {
        return Verdict::Skip(SkipReason::UnknownStock);
    };

    if crosses_below(before.value(), stock, threshold) {
        Verdict::Crossed { stock, threshold }
    } else {
        Verdict::Skip(SkipReason::NoCrossing)
    }
}

/// Strict downward crossing test on known values.
#[must_use]
pub fn crosses_below(before: Option<f64>, after: f64, threshold: f64) -> bool {
    match before {
        Some(before) => before >= threshold && after < threshold,
        None => after < threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(v: f64) -> Quantity {
        Quantity::Value(v)
    }

    #[test]
    fn stays_above_does_not_cross() {
        assert_eq!(
            evaluate(q(20.0), q(20.0), q(10.0)),
            Verdict::Skip(SkipReason::NoCrossing)
        );
    }

    #[test]
    fn dropping_below_crosses() {
        assert_eq!(
            evaluate(q(15.0), q(8.0), q(10.0)),
            Verdict::Crossed {
                stock: 8.0,
                threshold: 10.0
            }
        );
    }

    #[test]
    fn already_below_does_not_cross_again() {
        assert_eq!(
            evaluate(q(5.0), q(3.0), q(10.0)),
            Verdict::Skip(SkipReason::NoCrossing)
        );
    }

    #[test]
    fn previous_at_threshold_counts_as_above() {
        assert!(evaluate(q(10.0), q(9.0), q(10.0)).is_crossed());
    }

    #[test]
    fn landing_exactly_on_threshold_is_not_below() {
        assert_eq!(
            evaluate(q(15.0), q(10.0), q(10.0)),
            Verdict::Skip(SkipReason::NoCrossing)
        );
    }

    #[test]
    fn unknown_previous_stock_counts_as_above() {
        assert!(evaluate(Quantity::Unknown, q(3.0), q(5.0)).is_crossed());
        assert_eq!(
            evaluate(Quantity::Unknown, q(6.0), q(5.0)),
            Verdict::Skip(SkipReason::NoCrossing)
        );
    }

    #[test]
    fn unknown_threshold_always_skips() {
        for (before, after) in [
            (q(20.0), q(1.0)),
            (Quantity::Unknown, q(0.0)),
            (q(1.0), Quantity::Unknown),
        ] {
            assert_eq!(
                evaluate(before, after, Quantity::Unknown),
                Verdict::Skip(SkipReason::InvalidThreshold)
            );
        }
    }

    #[test]
    fn unknown_current_stock_skips() {
        assert_eq!(
            evaluate(q(20.0), Quantity::Unknown, q(10.0)),
            Verdict::Skip(SkipReason::UnknownStock)
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let first = evaluate(q(15.0), q(8.0), q(10.0));
        let _ = evaluate(q(5.0), q(3.0), q(10.0));
        let second = evaluate(q(15.0), q(8.0), q(10.0));
        assert_eq!(first, second);
    }

    #[test]
    fn negative_and_fractional_values() {
        assert!(crosses_below(Some(0.5), -1.0, 0.0));
        assert!(crosses_below(Some(2.5), 2.25, 2.5));
        assert!(!crosses_below(Some(2.25), 2.0, 2.5));
    }
}
