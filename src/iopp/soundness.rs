//! Closed-form soundness error of FRI in the list-decoding (Johnson) regime
//!
//! For rate \rho, proximity parameter m, |L_0| = 2^c, |F| = 2^f and \ell queries:
//!
//! ```text
//! alpha  = sqrt(rho) * (1 + 1/2m)
//! term_1 = (m + 1/2)^7 * |L_0|^2 / (2 * rho^{3/2} * |F|)
//! term_2 = (2m + 1) * (|L_0| + 1) / sqrt(rho) * sum_i 2^{arity_bits_i} / |F|
//! term_3 = alpha^\ell
//! ```
//!
//! Everything is evaluated with `f64`. Powers of two with exponents above 1023 leave
//! the `f64` range, in which case [`estimate`] reports [`SoundnessError::NumericOverflow`]
//! instead of returning `inf`/`NaN`. [`FriSoundnessParams::log2_estimate`] works in
//! log-scale and has no such limit.

use ark_std::{end_timer, start_timer};
use p3_maybe_rayon::prelude::*;

use crate::{iopp::fri_params::FriSoundnessParams, SoundnessError};

/// The three error terms of one evaluation of the bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundnessTerms {
    /// rate \rho
    pub rho: f64,
    /// 1 - \delta, the per-query acceptance probability of a far word
    pub alpha: f64,
    /// proximity-gap error (field size vs. rate trade-off)
    pub term_1: f64,
    /// folding error summed over all rounds
    pub term_2: f64,
    /// query error alpha^\ell
    pub term_3: f64,
}

impl SoundnessTerms {
    /// the soundness error bound, not clamped to 1
    #[inline]
    pub fn total(&self) -> f64 {
        self.term_1 + self.term_2 + self.term_3
    }
}

impl FriSoundnessParams {
    /// Evaluate each term of the bound separately
    pub fn terms(&self) -> Result<SoundnessTerms, SoundnessError> {
        let m = self.m;
        let rho = self.rate();
        let alpha = self.alpha()?;

        let codeword_size = finite(pow2(self.codeword_size_bits), "2^codeword_size_bits")?;
        let codeword_size_sq = finite(
            pow2(self.codeword_size_bits.saturating_mul(2)),
            "2^(2 * codeword_size_bits)",
        )?;
        let field_size = finite(pow2(self.field_size_bits), "2^field_size_bits")?;
        let arity_sum = finite(
            self.arity_bits.iter().map(|&a| (a as f64).exp2()).sum(),
            "sum of 2^arity_bits",
        )?;

        let term_1 = finite(
            (m + 0.5).powi(7) * codeword_size_sq / (2.0 * rho.powf(1.5) * field_size),
            "term_1",
        )?;
        let term_2 = finite(
            (2.0 * m + 1.0) * (codeword_size + 1.0) / rho.sqrt() * arity_sum / field_size,
            "term_2",
        )?;
        let term_3 = finite(pow_usize(alpha, self.num_queries), "term_3")?;

        Ok(SoundnessTerms {
            rho,
            alpha,
            term_1,
            term_2,
            term_3,
        })
    }

    /// Soundness error bound, see [`estimate`]
    pub fn estimate(&self) -> Result<f64, SoundnessError> {
        finite(self.terms()?.total(), "soundness error")
    }

    /// Same as [`Self::estimate`], but rejects parameters violating [`Self::validate`] first
    pub fn estimate_checked(&self) -> Result<f64, SoundnessError> {
        self.validate()?;
        self.estimate()
    }

    /// log2 of the soundness error bound, computed in log-scale throughout.
    ///
    /// Unlike [`Self::estimate`], intermediate values never leave the `f64` range, so this
    /// works for codeword and field sizes far beyond 2^1023.
    ///
    /// Requires m > 0: the bound is only defined for a positive proximity parameter and
    /// logarithms of the negative factors it would otherwise involve do not exist.
    pub fn log2_estimate(&self) -> Result<f64, SoundnessError> {
        let m = self.m;
        if m == 0.0 {
            return Err(SoundnessError::DivisionByZero("1 / (2 * m)"));
        }
        if !m.is_finite() || m < 0.0 {
            return Err(SoundnessError::InvalidParameter(format!(
                "log-scale evaluation requires a positive finite m, got {}",
                m
            )));
        }

        let rate_bits = self.rate_bits as f64;
        let c = self.codeword_size_bits as f64;
        let f = self.field_size_bits as f64;

        let log_term_1 = 7.0 * (m + 0.5).log2() + 2.0 * c - 1.0 + 1.5 * rate_bits - f;
        let log_arity_sum = log2_sum_exp2(self.arity_bits.iter().map(|&a| a as f64));
        let log_term_2 = (2.0 * m + 1.0).log2() + log2_sum_exp2([c, 0.0]) + 0.5 * rate_bits
            + log_arity_sum
            - f;
        let log_alpha = (1.0 + (2.0 * m).recip()).log2() - 0.5 * rate_bits;
        // alpha^0 = 1 even when alpha is huge
        let log_term_3 = match self.num_queries {
            0 => 0.0,
            q => q as f64 * log_alpha,
        };

        let log_total = log2_sum_exp2([log_term_1, log_term_2, log_term_3]);
        if log_total.is_nan() || log_total == f64::INFINITY {
            return Err(SoundnessError::NumericOverflow("log2 of soundness error"));
        }
        Ok(log_total)
    }

    /// Bits of security, -log2 of the soundness error bound
    pub fn security_bits(&self) -> Result<f64, SoundnessError> {
        Ok(-self.log2_estimate()?)
    }
}

/// Upper bound on the probability that a cheating prover passes FRI verification.
///
/// `num_functions` and `num_rounds` do not enter the formula. No parameter validation is
/// done beyond rejecting a zero or non-finite m; use [`FriSoundnessParams::estimate_checked`] for that.
///
/// # Errors
/// - [`SoundnessError::DivisionByZero`] if `m == 0`
/// - [`SoundnessError::InvalidParameter`] if `m` is NaN or infinite
/// - [`SoundnessError::NumericOverflow`] if any intermediate value is not a finite `f64`
pub fn estimate(params: &FriSoundnessParams) -> Result<f64, SoundnessError> {
    params.estimate()
}

/// Evaluate many independent parameter sets, output in input order
pub fn estimate_batch(params: &[FriSoundnessParams]) -> Vec<Result<f64, SoundnessError>> {
    let batch_time = start_timer!(|| ark_std::format!(
        "FRI soundness for {} parameter sets",
        params.len()
    ));
    let bounds = params.par_iter().map(estimate).collect();
    end_timer!(batch_time);
    bounds
}

#[inline]
fn pow2(exp: i32) -> f64 {
    (exp as f64).exp2()
}

/// base^exp, `powi` only takes an `i32` exponent
fn pow_usize(base: f64, exp: usize) -> f64 {
    match i32::try_from(exp) {
        Ok(exp) => base.powi(exp),
        Err(_) => base.powf(exp as f64),
    }
}

#[inline]
fn finite(value: f64, what: &'static str) -> Result<f64, SoundnessError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SoundnessError::NumericOverflow(what))
    }
}

/// log2(sum_i 2^{x_i}), stable for large |x_i|; an empty sum is -inf
fn log2_sum_exp2(exps: impl IntoIterator<Item = f64>) -> f64 {
    let exps: Vec<f64> = exps.into_iter().collect();
    let max = exps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + exps.iter().map(|x| (x - max).exp2()).sum::<f64>().log2()
}
