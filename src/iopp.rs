//! Interactive Oracle Proof of Proximity (IOPP) parameters and their soundness
//! We only focus on FRI over Reed-Solomon codes with power-of-two rates

pub mod fri_params;
pub mod soundness;
