//! Code-division spreading and despreading over a shared in-memory channel.
//!
//! Several stations each register one fixed-length message with a
//! [`Transmitter`]. Every message bit becomes a sign (`1 → +1`, `0 → -1`)
//! that multiplies the station's Walsh code; the spread signals of all
//! stations are summed chip by chip into a single [`ChipStream`]. A
//! [`Receiver`] correlates each `n`-chip block of that stream with one
//! station's code and thresholds the sum at zero to recover the bit.
//!
//! ```text
//!  "ab" ─▶ ±1 bits ─▶ × code[0] ─┐
//!                                ├─▶ Σ ─▶ ChipStream ─▶ · code[i] ─▶ > 0 ─▶ message i
//!  "cd" ─▶ ±1 bits ─▶ × code[1] ─┘
//! ```
//!
//! The transmitter and receivers share one immutable [`CodeSet`] through an
//! `Arc`, and decoding never mutates the stream, so any number of stations
//! can be decoded from the same stream, from any number of threads.

pub mod bits;
pub mod channel;
pub mod config;
pub mod receiver;
pub mod transmitter;

pub use channel::{Channel, RoundTrip};
pub use config::CodecConfig;
pub use receiver::{correlate, Receiver};
pub use transmitter::Transmitter;

// Re-export the types that flow through the public API.
pub use cdma_types::{CdmaError, CdmaResult, ChipStream, ErrorKind, StationIndex};
pub use cdma_walsh::CodeSet;
