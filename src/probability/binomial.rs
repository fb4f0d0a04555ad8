//! # Binomial Tail
//!
//! `P(X >= k)` for `X ~ Binomial(n, p)`, with defined values at every edge.

use crate::tables::odds::clamp_probability;

/// Binomial coefficient `C(n, k)` as a float.
///
/// Uses the product form over the smaller of `k` and `n - k`, so moderate `n`
/// never overflows. Precision degrades for very large `n`.
///
/// # Examples
///
/// ```
/// use waylay::binomial_coefficient;
///
/// assert_eq!(binomial_coefficient(5, 2), 10.0);
/// assert_eq!(binomial_coefficient(5, 0), 1.0);
/// assert_eq!(binomial_coefficient(3, 4), 0.0);
/// ```
pub fn binomial_coefficient(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, j| acc * f64::from(n - j) / f64::from(j + 1))
}

/// Probability of at least `k` successes in `n` trials of probability `p`.
///
/// `k > n` gives 0, `k == 0` gives 1, then `p <= 0` gives 0 and `p >= 1`
/// gives 1. A NaN `p` counts as 0.
///
/// # Examples
///
/// ```
/// use waylay::calc_prob_at_least;
///
/// assert_eq!(calc_prob_at_least(0.5, 1, 1), 0.5);
/// assert!((calc_prob_at_least(0.5, 1, 2) - 0.75).abs() < 1e-12);
/// assert_eq!(calc_prob_at_least(0.3, 4, 3), 0.0);
/// ```
pub fn calc_prob_at_least(p: f64, k: u32, n: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    if k == 0 {
        return 1.0;
    }
    if p.is_nan() || p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }

    let below: f64 = (0..k)
        .map(|i| binomial_coefficient(n, i) * p.powf(f64::from(i)) * (1.0 - p).powf(f64::from(n - i)))
        .sum();
    (1.0 - below).clamp(0.0, 1.0)
}

/// Probability of no successes in `n` trials: `(1 - p)^n`.
pub fn prob_none(p: f64, n: u32) -> f64 {
    (1.0 - clamp_probability(p)).powf(f64::from(n))
}
