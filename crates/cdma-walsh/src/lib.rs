//! Orthogonal spreading codes for the CDMA channel simulator.
//!
//! - [`hadamard`] builds the Sylvester-Hadamard matrix of a power-of-two order
//! - [`CodeSet`] owns that matrix and hands out one row per station
//!
//! ```text
//! H(1) = [1]      H(2n) = [ H(n)  H(n) ]
//!                         [ H(n) -H(n) ]
//! ```
//!
//! Any two distinct rows have a dot product of 0 and every row's self
//! product equals the order, which is what lets a receiver pull one station
//! out of the summed channel.

pub mod code_set;
pub mod hadamard;

pub use code_set::{dot, CodeSet};
pub use hadamard::generate;
