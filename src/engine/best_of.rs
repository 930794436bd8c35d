//! Exact best-of-N match probabilities from a constant per-set win rate.
//!
//! A best-of-`2m-1` contest is a race to `m` unit wins. Probability mass is
//! pushed through the `(wins1, wins2)` lattice one set at a time; a state
//! stops expanding once either side reaches `m`. No sampling is involved, so
//! identical inputs always produce identical outputs.

use tracing::warn;

/// Upper bound on the match format accepted by the solver.
pub const MAX_BEST_OF: u32 = 99;

/// Format used when none (or a non-numeric one) is supplied.
pub const DEFAULT_BEST_OF: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct BestOfOutcome {
    /// The (odd) format actually solved.
    pub best_of: u32,
    /// Sets needed to take the match.
    pub need: u32,
    /// Probability side 1 reaches `need` first.
    pub win_probability: f64,
    /// `(sets played, probability)` for every possible match length.
    pub length_distribution: Vec<(u32, f64)>,
    /// Mean number of sets played.
    pub expected_length: f64,
}

/// Coerce an arbitrary requested format into a playable one.
///
/// Non-finite input becomes [`DEFAULT_BEST_OF`]; otherwise the value is
/// rounded, raised to at least 1, bumped to the next odd number when even,
/// and capped at [`MAX_BEST_OF`].
pub fn coerce_best_of(requested: f64) -> u32 {
    if !requested.is_finite() {
        return DEFAULT_BEST_OF;
    }
    let n = requested.round().clamp(1.0, MAX_BEST_OF as f64) as u32;
    if n % 2 == 0 {
        (n + 1).min(MAX_BEST_OF)
    } else {
        n
    }
}

/// Solve a best-of-`best_of` contest where side 1 wins each set with
/// probability `p`.
pub fn solve_best_of(p: f64, best_of: u32) -> BestOfOutcome {
    let coerced = coerce_best_of(best_of as f64);
    if coerced != best_of {
        warn!(requested = best_of, used = coerced, "best-of format coerced");
    }
    let best_of = coerced;
    let p = if p.is_nan() { 0.5 } else { p.clamp(0.0, 1.0) };
    let q = 1.0 - p;
    let need = (best_of + 1) / 2;
    let m = need as usize;

    let mut dp = vec![vec![0.0f64; m + 1]; m + 1];
    dp[0][0] = 1.0;
    for w in 0..m {
        for l in 0..m {
            let cur = dp[w][l];
            if cur == 0.0 {
                continue;
            }
            dp[w + 1][l] += cur * p;
            dp[w][l + 1] += cur * q;
        }
    }

    let win_probability: f64 = (0..m).map(|l| dp[m][l]).sum();

    // Terminal states of length n are (need, n - need) and (n - need, need).
    let length_distribution: Vec<(u32, f64)> = (need..=best_of)
        .map(|n| {
            let other = (n - need) as usize;
            (n, dp[m][other] + dp[other][m])
        })
        .collect();
    let expected_length = length_distribution
        .iter()
        .map(|(n, prob)| *n as f64 * prob)
        .sum();

    BestOfOutcome {
        best_of,
        need,
        win_probability,
        length_distribution,
        expected_length,
    }
}

/// Negative-binomial closed form `Σ_{l<m} C(m-1+l, l)·pᵐ·(1-p)ˡ`.
pub fn closed_form_win_probability(p: f64, best_of: u32) -> f64 {
    let m = (coerce_best_of(best_of as f64) + 1) / 2;
    (0..m)
        .map(|l| binomial(m - 1 + l, l) * p.powi(m as i32) * (1.0 - p).powi(l as i32))
        .sum()
}

fn binomial(n: u32, k: u32) -> f64 {
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}
