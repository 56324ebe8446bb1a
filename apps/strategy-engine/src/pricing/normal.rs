//! Standard normal density and a polynomial CDF approximation.

use std::f64::consts::PI;

/// Standard normal PDF: `exp(-x²/2) / sqrt(2π)`.
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal CDF via the Abramowitz–Stegun 26.2.17 polynomial.
///
/// Maximum absolute error is about 7.5e-8. NaN in gives NaN out.
#[inline]
#[allow(clippy::suboptimal_flops)]
pub fn norm_cdf(x: f64) -> f64 {
    const P: f64 = 0.231_641_9;
    const A1: f64 = 0.319_381_530;
    const A2: f64 = -0.356_563_782;
    const A3: f64 = 1.781_477_937;
    const A4: f64 = -1.821_255_978;
    const A5: f64 = 1.330_274_429;

    let z = x.abs();
    let t = 1.0 / (1.0 + P * z);
    let poly = t * (A1 + t * (A2 + t * (A3 + t * (A4 + t * A5))));
    let upper = 1.0 - norm_pdf(z) * poly;

    if x >= 0.0 {
        upper
    } else if x < 0.0 {
        1.0 - upper
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    fn exact_cdf(x: f64) -> f64 {
        0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
    }

    #[test]
    fn test_norm_cdf() {
        assert!(approx_eq(norm_cdf(0.0), 0.5, 1e-7));
        assert!(approx_eq(norm_cdf(1.96), 0.975, 0.001));
        assert!(approx_eq(norm_cdf(-1.96), 0.025, 0.001));
    }

    #[test]
    fn test_norm_cdf_error_bound_against_erf() {
        let mut x = -6.0;
        while x <= 6.0 {
            assert!(
                approx_eq(norm_cdf(x), exact_cdf(x), 1e-7),
                "cdf({x}) drifted from erf reference"
            );
            x += 0.05;
        }
    }

    #[test]
    fn test_norm_cdf_symmetry_and_limits() {
        for x in [0.1, 0.5, 1.0, 2.5] {
            assert!(approx_eq(norm_cdf(x) + norm_cdf(-x), 1.0, 1e-12));
        }
        assert!(approx_eq(norm_cdf(f64::INFINITY), 1.0, 1e-12));
        assert!(approx_eq(norm_cdf(f64::NEG_INFINITY), 0.0, 1e-12));
        assert!(norm_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_norm_pdf() {
        assert!(approx_eq(norm_pdf(0.0), 0.398_942_280_4, 1e-9));
        assert!(approx_eq(norm_pdf(1.0), norm_pdf(-1.0), 1e-15));
    }
}
