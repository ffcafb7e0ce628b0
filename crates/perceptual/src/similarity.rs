//! Set similarity on a 0-100 scale.

use std::collections::BTreeSet;

/// Scores are rounded to this many decimal places so threshold comparisons
/// do not flip on floating-point noise.
const SCORE_SCALE: f64 = 1e6;

/// Jaccard similarity `|A∩B| / |A∪B| × 100`.
///
/// Defined as 0 when both sets are empty. Symmetric.
///
/// ```rust
/// use std::collections::BTreeSet;
/// use perceptual::jaccard;
///
/// let a: BTreeSet<&str> = ["rust", "tokio", "redis"].into_iter().collect();
/// let b: BTreeSet<&str> = ["rust", "redis"].into_iter().collect();
/// assert!((jaccard(&a, &b) - 66.666667).abs() < 1e-9);
/// assert_eq!(jaccard(&a, &a), 100.0);
/// ```
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    clamp_score(intersection as f64 / union as f64 * 100.0)
}

/// Clamp a score into [0, 100] and round it to six decimals.
///
/// Non-finite values never propagate: NaN becomes 0, infinities saturate.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    let clamped = score.clamp(0.0, 100.0);
    (clamped * SCORE_SCALE).round() / SCORE_SCALE
}
