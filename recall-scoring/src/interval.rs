//! Wilson score interval for binomial proportions.
//!
//! Every accuracy figure in a report is a proportion `k/n`. Its interval is
//! computed from the closed form below so results are reproducible bit for
//! bit; nothing here iterates or approximates.
//!
//! ```text
//! p      = k / n
//! denom  = 1 + z² / n
//! center = (p + z² / 2n) / denom
//! half   = z · sqrt((p(1 - p) + z² / 4n) / n) / denom
//! ```
//!
//! With `n == 0` there is nothing to estimate and the functions return
//! `None`. Callers carry that `None` through to the output untouched.

use serde::{Deserialize, Serialize};

/// Standard normal quantile for a two-sided 95% interval.
pub const DEFAULT_Z: f64 = 1.96;

/// Two-sided confidence bounds, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Lower bound as a percentage.
    #[must_use]
    pub fn lower_percent(&self) -> f64 {
        self.lower * 100.0
    }

    /// Upper bound as a percentage.
    #[must_use]
    pub fn upper_percent(&self) -> f64 {
        self.upper * 100.0
    }

    /// Midpoint of the bounds.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

/// Wilson score interval for `k` successes out of `n` trials.
///
/// Returns `None` when `n == 0`. Bounds are clamped to `[0, 1]`, since the
/// closed form can round a hair past either end when `k` is `0` or `n`.
#[must_use]
pub fn wilson_interval(k: u64, n: u64, z: f64) -> Option<Interval> {
    if n == 0 {
        return None;
    }
    let n = n as f64;
    let p = k as f64 / n;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half = z * ((p * (1.0 - p) + z2 / (4.0 * n)) / n).sqrt() / denom;
    Some(Interval {
        lower: (center - half).max(0.0),
        upper: (center + half).min(1.0),
    })
}

/// Plain proportion `k/n`, `None` when `n == 0`.
#[must_use]
pub fn proportion(k: u64, n: u64) -> Option<f64> {
    (n > 0).then(|| k as f64 / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn zero_trials_is_not_computable() {
        assert_eq!(wilson_interval(0, 0, DEFAULT_Z), None);
        assert_eq!(proportion(0, 0), None);
    }

    #[test]
    fn matches_closed_form_for_three_of_six() {
        let interval = wilson_interval(3, 6, DEFAULT_Z).unwrap();

        // Symmetric around 0.5 for p = 0.5
        assert!((interval.center() - 0.5).abs() < EPS);
        assert!((interval.lower - 0.187_612_8).abs() < 1e-6);
        assert!((interval.upper - 0.812_387_2).abs() < 1e-6);
    }

    #[test]
    fn one_of_three_matches_reference_values() {
        let interval = wilson_interval(1, 3, DEFAULT_Z).unwrap();

        assert!((interval.lower - 0.061_490_3).abs() < 1e-6);
        assert!((interval.upper - 0.792_345_0).abs() < 1e-6);
    }

    #[test]
    fn zero_successes_has_positive_upper_bound() {
        let interval = wilson_interval(0, 10, DEFAULT_Z).unwrap();

        assert!(interval.lower.abs() < EPS);
        assert!(interval.upper > 0.0);
        assert!((interval.upper - 0.277_540_2).abs() < 1e-6);
    }

    #[test]
    fn all_successes_mirrors_zero_successes() {
        let low = wilson_interval(0, 10, DEFAULT_Z).unwrap();
        let high = wilson_interval(10, 10, DEFAULT_Z).unwrap();

        assert!((high.upper - (1.0 - low.lower)).abs() < EPS);
        assert!((high.lower - (1.0 - low.upper)).abs() < EPS);
        assert!(high.lower < 1.0);
    }

    #[test]
    fn zero_successes_never_dips_below_zero() {
        let interval = wilson_interval(0, 15, DEFAULT_Z).unwrap();

        assert!(interval.lower >= 0.0);
        assert!(interval.upper < 1.0);
    }

    #[test]
    fn all_successes_never_exceeds_one() {
        let interval = wilson_interval(19, 19, DEFAULT_Z).unwrap();

        assert!(interval.upper <= 1.0);
        assert!(interval.lower > 0.0);
    }

    #[test]
    fn extreme_counts_stay_in_unit_range() {
        for n in 1..=2000 {
            let low = wilson_interval(0, n, DEFAULT_Z).unwrap();
            let high = wilson_interval(n, n, DEFAULT_Z).unwrap();

            assert!(low.lower >= 0.0, "n={n} lower={}", low.lower);
            assert!(high.upper <= 1.0, "n={n} upper={}", high.upper);
        }
    }

    #[test]
    fn wider_z_gives_wider_interval() {
        let narrow = wilson_interval(4, 10, 1.0).unwrap();
        let wide = wilson_interval(4, 10, 2.576).unwrap();

        assert!(wide.lower < narrow.lower);
        assert!(wide.upper > narrow.upper);
    }

    #[test]
    fn percent_forms_scale_bounds() {
        let interval = Interval {
            lower: 0.25,
            upper: 0.5,
        };

        assert_eq!(interval.lower_percent(), 25.0);
        assert_eq!(interval.upper_percent(), 50.0);
    }

    #[test]
    fn proportion_divides_counts() {
        assert_eq!(proportion(1, 4), Some(0.25));
        assert_eq!(proportion(0, 4), Some(0.0));
    }
}
