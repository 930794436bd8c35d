//! Numeric building blocks shared by every sport model.

/// Normalise a vector of log-odds into a probability distribution.
///
/// The maximum score is subtracted before exponentiation so large inputs
/// cannot overflow; the result is mathematically unchanged.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Standard logistic sigmoid function.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `n!` as a float. `0! = 1! = 1`.
pub fn factorial(n: u32) -> f64 {
    (2..=n).fold(1.0, |acc, i| acc * i as f64)
}

/// Poisson probability mass `λᵏ·e^-λ / k!`.
///
/// Evaluated in log space so a huge rate gives a vanishing mass rather than
/// `inf · 0`. Callers guarantee `lambda > 0` by flooring their scoring rates.
pub fn poisson_pmf(k: u32, lambda: f64) -> f64 {
    debug_assert!(lambda > 0.0, "poisson rate must be positive");
    (k as f64 * lambda.ln() - lambda - factorial(k).ln()).exp()
}

/// Probability that two independent Poisson counts sum past `line`,
/// truncated to `[0, max_goals]` per side.
pub fn poisson_total_over(lambda1: f64, lambda2: f64, max_goals: u32, line: f64) -> f64 {
    let mut p = 0.0;
    for i in 0..=max_goals {
        for j in 0..=max_goals {
            if (i + j) as f64 > line {
                p += poisson_pmf(i, lambda1) * poisson_pmf(j, lambda2);
            }
        }
    }
    p
}

/// Round half-up (toward +∞) to `decimals` places.
pub fn round(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor + 0.5).floor() / factor
}

/// Probability in [0, 1] to a whole percentage.
pub fn percent(p: f64) -> f64 {
    round(p * 100.0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn softmax_sums_to_one() {
        let p = softmax(&[0.7, -0.11, -0.7]);
        assert_relative_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(p.iter().all(|x| *x > 0.0 && *x < 1.0));
        assert!(p[0] > p[1] && p[1] > p[2]);
    }

    #[test]
    fn softmax_equal_scores_is_uniform() {
        let p = softmax(&[0.3, 0.3, 0.3, 0.3]);
        for x in p {
            assert_relative_eq!(x, 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn softmax_survives_huge_scores() {
        let p = softmax(&[1000.0, 999.0]);
        assert!(p.iter().all(|x| x.is_finite()));
        assert_relative_eq!(p[0], sigmoid(1.0), epsilon = 1e-12);
    }

    #[test]
    fn softmax_empty() {
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn sigmoid_properties() {
        assert_relative_eq!(sigmoid(0.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(sigmoid(1.3) + sigmoid(-1.3), 1.0, epsilon = 1e-12);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
    }

    #[test]
    fn factorial_small_values() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(5), 120.0);
        assert_eq!(factorial(8), 40320.0);
    }

    #[test]
    fn poisson_pmf_known_values() {
        assert_relative_eq!(poisson_pmf(0, 1.0), (-1.0f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(poisson_pmf(2, 3.0), 4.5 * (-3.0f64).exp(), epsilon = 1e-12);
        let total: f64 = (0..40).map(|k| poisson_pmf(k, 2.5)).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn poisson_pmf_huge_rate_is_finite() {
        for k in 0..=8 {
            let p = poisson_pmf(k, 1e60);
            assert!(p.is_finite() && p >= 0.0, "k={k} gave {p}");
        }
        let over = poisson_total_over(1e60, 1.0, 6, 2.5);
        assert!((0.0..=1.0).contains(&over));
    }

    #[test]
    fn poisson_total_over_matches_single_poisson_of_sum() {
        // Sum of independent Poissons is Poisson(λ1 + λ2); truncation at 12 is
        // negligible for these rates.
        let p = poisson_total_over(1.4, 1.1, 12, 2.5);
        let under: f64 = (0..=2).map(|k| poisson_pmf(k, 2.5)).sum();
        assert_relative_eq!(p, 1.0 - under, epsilon = 1e-6);
    }

    #[test]
    fn round_is_half_up() {
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(-2.5, 0), -2.0);
        assert_eq!(round(1.234, 2), 1.23);
        assert_eq!(round(1.235, 1), 1.2);
    }

    #[test]
    fn percent_rounds_to_whole_points() {
        assert_eq!(percent(0.5), 50.0);
        assert_eq!(percent(0.6149), 61.0);
        assert_eq!(percent(0.625), 63.0);
    }
}
