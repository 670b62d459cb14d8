//! Foundation types for the CDMA channel simulator.
//!
//! Every other crate in the workspace depends on `cdma-types`. It carries no
//! algorithms of its own, only the values that flow between the code
//! generator, the transmitter, and the receiver.
//!
//! # Key Types
//!
//! - [`CdmaError`] / [`ErrorKind`] — Failure taxonomy shared by every operation
//! - [`ChipStream`] — The combined, spread signal handed from transmitter to receiver
//! - [`StationIndex`] — Row of the code matrix assigned to one station

pub mod chip;
pub mod error;
pub mod station;

pub use chip::{ChipStream, BITS_PER_CHAR};
pub use error::{CdmaError, CdmaResult, ErrorKind};
pub use station::StationIndex;
