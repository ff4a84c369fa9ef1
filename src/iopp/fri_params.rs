//! Public parameters of a FRI instance that enter its soundness bound
//! Johnson-regime bound of Sec 4.3 of <https://eprint.iacr.org/2024/1161>

use ark_ff::{Field, PrimeField};

use crate::SoundnessError;

/// Parameters for the closed-form FRI soundness bound.
///
/// `num_functions` and `num_rounds` never enter the arithmetic; they are carried so a
/// parameter set describes the whole FRI instance, and [`Self::validate`] checks
/// `num_rounds` against the reduction schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct FriSoundnessParams {
    /// number of committed functions (batched into one FRI instance)
    pub num_functions: usize,
    /// rate \rho = 2^-rate_bits
    pub rate_bits: i32,
    /// log |L_0|, the size of the initial evaluation domain
    pub codeword_size_bits: i32,
    /// Johnson proximity parameter, proximity \delta = 1 - sqrt(\rho) * (1 + 1/2m)
    pub m: f64,
    /// log of the folding arity of each round, large domain to small
    pub arity_bits: Vec<usize>,
    /// number of folding rounds
    pub num_rounds: usize,
    /// log |F|, extension included
    pub field_size_bits: i32,
    /// number of queries (\ell)
    pub num_queries: usize,
}

impl FriSoundnessParams {
    /// init a parameter set, arguments in the same order as the fields
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        num_functions: usize,
        rate_bits: i32,
        codeword_size_bits: i32,
        m: f64,
        arity_bits: Vec<usize>,
        num_rounds: usize,
        field_size_bits: i32,
        num_queries: usize,
    ) -> Self {
        Self {
            num_functions,
            rate_bits,
            codeword_size_bits,
            m,
            arity_bits,
            num_rounds,
            field_size_bits,
            num_queries,
        }
    }

    /// Derive parameters from a reduction schedule over field `F`
    /// - degree_bits: log of the degree bound of the committed polynomial
    /// - rate_bits: log of the blowup factor = \rho^-1
    /// - reduction_arity_bits: log arity of every folding step, one entry per round
    ///
    /// The codeword lives on a domain of size 2^(degree_bits + rate_bits).
    pub fn from_reduction_schedule<F: Field>(
        degree_bits: usize,
        rate_bits: usize,
        m: f64,
        reduction_arity_bits: Vec<usize>,
        num_queries: usize,
    ) -> Result<Self, SoundnessError> {
        let codeword_size_bits = degree_bits.checked_add(rate_bits).ok_or_else(|| {
            SoundnessError::InvalidParameter(format!(
                "degree_bits ({}) + rate_bits ({}) overflows",
                degree_bits, rate_bits
            ))
        })?;
        let codeword_size_bits = to_exponent(codeword_size_bits, "codeword_size_bits")?;
        let rate_bits = to_exponent(rate_bits, "rate_bits")?;
        let field_size_bits = to_exponent(field_size_bits::<F>(), "field_size_bits")?;
        let num_rounds = reduction_arity_bits.len();

        Ok(Self {
            num_functions: 1,
            rate_bits,
            codeword_size_bits,
            m,
            arity_bits: reduction_arity_bits,
            num_rounds,
            field_size_bits,
            num_queries,
        })
    }

    /// the rate \rho = 1 / 2^rate_bits
    #[inline]
    pub fn rate(&self) -> f64 {
        (-(self.rate_bits as f64)).exp2()
    }

    /// alpha = sqrt(\rho) * (1 + 1/2m), i.e. 1 - \delta
    pub fn alpha(&self) -> Result<f64, SoundnessError> {
        if self.m == 0.0 {
            return Err(SoundnessError::DivisionByZero("1 / (2 * m)"));
        }
        if !self.m.is_finite() {
            return Err(SoundnessError::InvalidParameter(format!(
                "m should be finite, got {}",
                self.m
            )));
        }
        Ok(self.rate().sqrt() * (1.0 + (2.0 * self.m).recip()))
    }

    /// Strict check of every parameter constraint.
    ///
    /// The bound itself is evaluated without any of these checks, so that nonsensical
    /// inputs (e.g. rate > 1) still yield the number the formula gives.
    pub fn validate(&self) -> Result<(), SoundnessError> {
        let invalid = |msg: String| Err(SoundnessError::InvalidParameter(msg));

        if self.num_functions == 0 {
            return invalid("num_functions should be positive".to_string());
        }
        if self.rate_bits <= 0 {
            return invalid(format!("rate_bits should be positive, got {}", self.rate_bits));
        }
        if self.codeword_size_bits <= 0 {
            return invalid(format!(
                "codeword_size_bits should be positive, got {}",
                self.codeword_size_bits
            ));
        }
        if !self.m.is_finite() || self.m <= 0.0 {
            return invalid(format!("m should be positive and finite, got {}", self.m));
        }
        if let Some(round) = self.arity_bits.iter().position(|&a| a == 0) {
            return invalid(format!("arity_bits[{}] should be at least 1", round));
        }
        if self.num_rounds != self.arity_bits.len() {
            return invalid(format!(
                "num_rounds ({}) mismatch arity_bits length ({})",
                self.num_rounds,
                self.arity_bits.len()
            ));
        }
        if self.field_size_bits <= 0 {
            return invalid(format!(
                "field_size_bits should be positive, got {}",
                self.field_size_bits
            ));
        }
        if self.num_queries == 0 {
            return invalid("num_queries should be positive".to_string());
        }
        Ok(())
    }
}

/// Bit size of |F| (with extension): log of the base prime modulus times extension degree
pub fn field_size_bits<F: Field>() -> usize {
    <F::BasePrimeField as PrimeField>::MODULUS_BIT_SIZE as usize * F::extension_degree() as usize
}

fn to_exponent(bits: usize, name: &str) -> Result<i32, SoundnessError> {
    i32::try_from(bits)
        .map_err(|_| SoundnessError::InvalidParameter(format!("{} too large: {}", name, bits)))
}
