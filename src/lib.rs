#![warn(
    unused,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]
#![deny(unsafe_code)]

use thiserror::Error;

pub mod iopp;
#[cfg(test)]
pub mod test_utils;

pub use iopp::{
    fri_params::{field_size_bits, FriSoundnessParams},
    soundness::{estimate, estimate_batch, SoundnessTerms},
};

/// Custom error type for soundness estimation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SoundnessError {
    #[error("Division by zero: {0}")]
    DivisionByZero(&'static str),
    #[error("Numeric overflow while computing {0}")]
    NumericOverflow(&'static str),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
