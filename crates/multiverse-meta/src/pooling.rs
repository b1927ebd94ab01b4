//! Inverse-variance random-effects pooling
//!
//! The pooled summary effect is the weighted mean with weights
//! `1 / (v_i + tau^2)`, where `tau^2` is the DerSimonian-Laird moment
//! estimate of the between-effect variance. With a single observation the
//! pooled effect is that observation.

use multiverse_core::{Error, Result};

/// DerSimonian-Laird estimate of the between-effect variance
///
/// `tau^2 = max(0, (Q - (k - 1)) / c)` with `Q` the fixed-effect
/// heterogeneity statistic and `c = sum(w) - sum(w^2)/sum(w)` for
/// fixed-effect weights `w_i = 1/v_i`.
pub fn dersimonian_laird_tau2(effects: &[f64], variances: &[f64]) -> Result<f64> {
    validate(effects, variances)?;

    let k = effects.len();
    if k < 2 {
        return Ok(0.0);
    }

    let weights: Vec<f64> = variances.iter().map(|&v| 1.0 / v).collect();
    let w_sum: f64 = weights.iter().sum();
    let fixed_mean = effects
        .iter()
        .zip(&weights)
        .map(|(&y, &w)| w * y)
        .sum::<f64>()
        / w_sum;

    let q: f64 = effects
        .iter()
        .zip(&weights)
        .map(|(&y, &w)| w * (y - fixed_mean).powi(2))
        .sum();
    let c = w_sum - weights.iter().map(|&w| w * w).sum::<f64>() / w_sum;

    if c <= 0.0 {
        // c is positive for k >= 2 in exact arithmetic; guard the
        // floating-point edge where huge weight ratios cancel
        return Ok(0.0);
    }

    Ok(((q - (k as f64 - 1.0)) / c).max(0.0))
}

/// Pooled random-effects summary of a set of effect observations
pub fn random_effects_mean(effects: &[f64], variances: &[f64]) -> Result<f64> {
    validate(effects, variances)?;

    if effects.len() == 1 {
        return Ok(effects[0]);
    }

    let tau2 = dersimonian_laird_tau2(effects, variances)?;
    let mut num = 0.0;
    let mut den = 0.0;
    for (&y, &v) in effects.iter().zip(variances) {
        let w = 1.0 / (v + tau2);
        num += w * y;
        den += w;
    }

    Ok(num / den)
}

fn validate(effects: &[f64], variances: &[f64]) -> Result<()> {
    if effects.is_empty() {
        return Err(Error::InvalidInput(
            "cannot pool an empty set of effects".to_string(),
        ));
    }
    if effects.len() != variances.len() {
        return Err(Error::shape_mismatch(
            "effect/variance vectors",
            effects.len(),
            variances.len(),
        ));
    }
    if effects.iter().any(|y| !y.is_finite()) {
        return Err(Error::Computation(
            "effect sizes contain NaN or infinite values".to_string(),
        ));
    }
    if variances.iter().any(|&v| !v.is_finite() || v <= 0.0) {
        return Err(Error::Computation(
            "sampling variances must be finite and positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_effect() {
        assert_eq!(random_effects_mean(&[0.3], &[0.05]).unwrap(), 0.3);
        assert_eq!(dersimonian_laird_tau2(&[0.3], &[0.05]).unwrap(), 0.0);
    }

    #[test]
    fn test_homogeneous_effects_have_zero_tau2() {
        // Q < k - 1 clamps tau^2 at zero
        let tau2 = dersimonian_laird_tau2(&[0.2, 0.4], &[0.04, 0.04]).unwrap();
        assert_eq!(tau2, 0.0);

        // Equal variances, zero tau^2: pooled mean is the plain average
        let pooled = random_effects_mean(&[0.2, 0.4], &[0.04, 0.04]).unwrap();
        assert_abs_diff_eq!(pooled, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_heterogeneous_effects() {
        // Hand-computed: w = (10, 5), fixed mean = 1/3, Q = 10/3,
        // c = 20/3, tau^2 = 7/20, pooled = 9/20
        let effects = [0.0, 1.0];
        let variances = [0.1, 0.2];

        let tau2 = dersimonian_laird_tau2(&effects, &variances).unwrap();
        assert_abs_diff_eq!(tau2, 0.35, epsilon = 1e-12);

        let pooled = random_effects_mean(&effects, &variances).unwrap();
        assert_abs_diff_eq!(pooled, 0.45, epsilon = 1e-12);
    }

    #[test]
    fn test_pooled_mean_within_effect_range() {
        let effects = [0.1, 0.5, 0.9, 0.3];
        let variances = [0.02, 0.08, 0.05, 0.03];
        let pooled = random_effects_mean(&effects, &variances).unwrap();
        assert!(pooled > 0.1 && pooled < 0.9);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(random_effects_mean(&[], &[]).is_err());
        assert!(random_effects_mean(&[0.1, 0.2], &[0.1]).is_err());
        assert!(random_effects_mean(&[0.1], &[0.0]).is_err());
        assert!(random_effects_mean(&[0.1], &[-0.1]).is_err());
        assert!(random_effects_mean(&[f64::NAN], &[0.1]).is_err());
        assert!(random_effects_mean(&[0.1], &[f64::INFINITY]).is_err());
    }

    #[test]
    fn test_duplicated_rows_after_resampling() {
        // A resample can draw the same row k times; the pool stays finite
        let pooled = random_effects_mean(&[0.3, 0.3, 0.3], &[0.05, 0.05, 0.05]).unwrap();
        assert_abs_diff_eq!(pooled, 0.3, epsilon = 1e-12);
    }
}
