//! Black-Scholes closed-form value and Greeks (no dividends).
//!
//! Scaling conventions:
//! - time to expiry is `days / 365`
//! - theta is daily decay (annual theta / 365)
//! - vega and rho are per 1% move (divided by 100)
//!
//! Zero volatility, zero time or a zero strike are not special-cased. The
//! formulas divide by zero and the results come out NaN or infinite;
//! callers treat those values as undefined.

// Black-Scholes uses standard mathematical notation (s, k, t, r, sigma)
// Financial formulas use standard notation where mul_add() obscures meaning
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use crate::options::OptionType;

use super::greeks::Greeks;
use super::normal::{norm_cdf, norm_pdf};

/// Calendar days per year used for time-to-expiry and daily theta.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Black-Scholes d1 parameter.
fn d1(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> f64 {
    ((s / k).ln() + (r + sigma * sigma / 2.0) * t) / (sigma * t.sqrt())
}

/// Black-Scholes d2 parameter.
fn d2(d1: f64, t: f64, sigma: f64) -> f64 {
    d1 - sigma * t.sqrt()
}

/// Black-Scholes Greeks for one long unit of an option.
///
/// # Arguments
///
/// * `option_type` - Call or put
/// * `strike` - Strike price
/// * `spot` - Current underlying price
/// * `iv` - Implied volatility (annualized, decimal)
/// * `days_to_expiry` - Calendar days until expiration
/// * `rate` - Risk-free rate (annualized, decimal)
#[must_use]
pub fn black_scholes_greeks(
    option_type: OptionType,
    strike: f64,
    spot: f64,
    iv: f64,
    days_to_expiry: f64,
    rate: f64,
) -> Greeks {
    let (s, k, r, sigma) = (spot, strike, rate, iv);
    let t = days_to_expiry / DAYS_PER_YEAR;
    let sqrt_t = t.sqrt();

    let d1 = d1(s, k, t, r, sigma);
    let d2 = d2(d1, t, sigma);
    let pdf_d1 = norm_pdf(d1);
    let discount = (-r * t).exp();

    let gamma = pdf_d1 / (s * sigma * sqrt_t);
    let vega = s * pdf_d1 * sqrt_t / 100.0;
    let decay = -s * pdf_d1 * sigma / (2.0 * sqrt_t);

    match option_type {
        OptionType::Call => Greeks::new(
            norm_cdf(d1),
            gamma,
            (decay - r * k * discount * norm_cdf(d2)) / DAYS_PER_YEAR,
            vega,
            k * t * discount * norm_cdf(d2) / 100.0,
        ),
        OptionType::Put => Greeks::new(
            norm_cdf(d1) - 1.0,
            gamma,
            (decay + r * k * discount * norm_cdf(-d2)) / DAYS_PER_YEAR,
            vega,
            -k * t * discount * norm_cdf(-d2) / 100.0,
        ),
    }
}

/// Black-Scholes theoretical value of one unit of an option.
#[must_use]
pub fn black_scholes_price(
    option_type: OptionType,
    strike: f64,
    spot: f64,
    iv: f64,
    days_to_expiry: f64,
    rate: f64,
) -> f64 {
    let (s, k, r, sigma) = (spot, strike, rate, iv);
    let t = days_to_expiry / DAYS_PER_YEAR;

    let d1 = d1(s, k, t, r, sigma);
    let d2 = d2(d1, t, sigma);
    let discount = (-r * t).exp();

    match option_type {
        OptionType::Call => s * norm_cdf(d1) - k * discount * norm_cdf(d2),
        OptionType::Put => k * discount * norm_cdf(-d2) - s * norm_cdf(-d1),
    }
}

/// Whether inputs fall outside the region where the closed form is defined.
#[must_use]
pub fn is_degenerate(strike: f64, spot: f64, iv: f64, days_to_expiry: f64) -> bool {
    !(strike > 0.0 && spot > 0.0 && iv > 0.0 && days_to_expiry > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_bs_call_atm() {
        // S=100, K=100, T=365d, r=0.05, sigma=0.20 -> ~10.45
        let price = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.20, 365.0, 0.05);
        assert!(approx_eq(price, 10.45, 0.01));
    }

    #[test]
    fn test_bs_put_atm() {
        // Put-call parity gives ~5.57
        let price = black_scholes_price(OptionType::Put, 100.0, 100.0, 0.20, 365.0, 0.05);
        assert!(approx_eq(price, 5.57, 0.01));
    }

    #[test]
    fn test_put_call_parity_on_price() {
        let (k, s, iv, days, r) = (105.0, 100.0, 0.3, 45.0, 0.04);
        let call = black_scholes_price(OptionType::Call, k, s, iv, days, r);
        let put = black_scholes_price(OptionType::Put, k, s, iv, days, r);
        let forward = s - k * (-r * days / DAYS_PER_YEAR).exp();
        assert!(approx_eq(call - put, forward, 1e-6));
    }

    #[test]
    fn test_atm_call_delta_near_half() {
        let g = black_scholes_greeks(OptionType::Call, 100.0, 100.0, 0.25, 7.0, 0.05);
        assert!(approx_eq(g.delta, 0.5, 0.03), "delta was {}", g.delta);
    }

    #[test]
    fn test_put_delta_is_call_delta_minus_one() {
        let call = black_scholes_greeks(OptionType::Call, 95.0, 100.0, 0.3, 30.0, 0.05);
        let put = black_scholes_greeks(OptionType::Put, 95.0, 100.0, 0.3, 30.0, 0.05);
        assert!(approx_eq(put.delta, call.delta - 1.0, 1e-12));
        assert!(approx_eq(put.gamma, call.gamma, 1e-15));
        assert!(approx_eq(put.vega, call.vega, 1e-15));
    }

    #[test]
    fn test_reference_values_one_year_atm() {
        // S=K=100, sigma=0.2, r=0.05, T=1y:
        // d1=0.35, d2=0.15, N(d1)=0.63683, phi(d1)=0.37524
        let g = black_scholes_greeks(OptionType::Call, 100.0, 100.0, 0.20, 365.0, 0.05);
        assert!(approx_eq(g.delta, 0.636_83, 1e-4));
        assert!(approx_eq(g.gamma, 0.018_762, 1e-5));
        assert!(approx_eq(g.vega, 0.375_24, 1e-4));
        // Annual theta ~ -6.414 -> daily ~ -0.01757
        assert!(approx_eq(g.theta, -6.414_03 / 365.0, 1e-5));
        // rho = K T e^{-rT} N(d2) / 100 ~ 0.532
        assert!(approx_eq(g.rho, 0.532_33, 1e-3));
    }

    #[test]
    fn test_put_theta_and_rho_signs() {
        let g = black_scholes_greeks(OptionType::Put, 100.0, 100.0, 0.20, 365.0, 0.05);
        assert!(g.rho < 0.0);
        assert!(g.theta < 0.0);
        assert!(g.delta < 0.0);
    }

    #[test]
    fn test_degenerate_inputs_are_not_guarded() {
        let zero_iv = black_scholes_greeks(OptionType::Call, 100.0, 100.0, 0.0, 30.0, 0.05);
        assert!(!zero_iv.gamma.is_finite());

        let zero_time = black_scholes_greeks(OptionType::Call, 100.0, 100.0, 0.2, 0.0, 0.05);
        assert!(!zero_time.theta.is_finite());

        assert!(is_degenerate(0.0, 100.0, 0.2, 30.0));
        assert!(is_degenerate(100.0, 100.0, 0.0, 30.0));
        assert!(!is_degenerate(100.0, 100.0, 0.2, 30.0));
    }
}
