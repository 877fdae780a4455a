//! Shared numeric foundation.
//!
//! This module contains the integer machinery every bit source is built on:
//!
//! - [`constants`]: fixed seeds, moduli and budget factors
//! - [`ring`]: gcd and exact modular arithmetic on `u64`
//! - [`mix`]: SplitMix64 stream and the seed → `(M, P, T)` derivation

pub mod constants;
pub mod mix;
pub mod ring;
