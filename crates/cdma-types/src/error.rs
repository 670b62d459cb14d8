use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// Coarse classification of a [`CdmaError`].
///
/// Callers that only need to branch on the category of failure match on the
/// kind; the error itself carries the context for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfMemory,
    InvalidArgument,
    BadMessageSize,
}

impl ErrorKind {
    /// Fixed human-readable description of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutOfMemory => "out of memory",
            Self::InvalidArgument => "invalid argument",
            Self::BadMessageSize => "bad message size",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by code generation, transmission, and reception.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CdmaError {
    #[error("code length must be a power of two, got {n}")]
    InvalidCodeLength { n: usize },

    #[error("station {station} is out of range for {available} codes")]
    StationOutOfRange { station: usize, available: usize },

    #[error("all {capacity} codes are already assigned")]
    TooManyStations { capacity: usize },

    #[error("chip stream of {len} chips is not a whole number of {block}-chip characters")]
    StreamLengthMismatch { len: usize, block: usize },

    #[error("chip stream was spread with {actual}-chip codes, receiver uses {expected}")]
    CodeLengthMismatch { expected: usize, actual: usize },

    #[error("message is {actual} characters, registered stations use {expected}")]
    BadMessageSize { expected: usize, actual: usize },

    #[error("allocation failed for {what}")]
    OutOfMemory { what: &'static str },
}

impl CdmaError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCodeLength { .. }
            | Self::StationOutOfRange { .. }
            | Self::TooManyStations { .. }
            | Self::StreamLengthMismatch { .. }
            | Self::CodeLengthMismatch { .. } => ErrorKind::InvalidArgument,
            Self::BadMessageSize { .. } => ErrorKind::BadMessageSize,
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
        }
    }

    /// Adapter for `map_err` on a failed `try_reserve`.
    pub fn alloc(what: &'static str) -> impl FnOnce(TryReserveError) -> Self {
        move |_| Self::OutOfMemory { what }
    }
}

pub type CdmaResult<T> = Result<T, CdmaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_are_fixed() {
        assert_eq!(ErrorKind::OutOfMemory.as_str(), "out of memory");
        assert_eq!(ErrorKind::InvalidArgument.as_str(), "invalid argument");
        assert_eq!(ErrorKind::BadMessageSize.as_str(), "bad message size");
        assert_eq!(ErrorKind::BadMessageSize.to_string(), "bad message size");
    }

    #[test]
    fn argument_errors_share_a_kind() {
        let errors = [
            CdmaError::InvalidCodeLength { n: 3 },
            CdmaError::StationOutOfRange { station: 9, available: 8 },
            CdmaError::TooManyStations { capacity: 4 },
            CdmaError::StreamLengthMismatch { len: 7, block: 64 },
            CdmaError::CodeLengthMismatch { expected: 8, actual: 4 },
        ];
        for err in errors {
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{err}");
        }
    }

    #[test]
    fn size_and_memory_kinds() {
        let size = CdmaError::BadMessageSize { expected: 2, actual: 3 };
        assert_eq!(size.kind(), ErrorKind::BadMessageSize);
        assert_eq!(size.to_string(), "message is 3 characters, registered stations use 2");

        let oom = CdmaError::OutOfMemory { what: "chip stream" };
        assert_eq!(oom.kind(), ErrorKind::OutOfMemory);
    }

    #[test]
    fn alloc_adapter_maps_reserve_failure() {
        let mut buf: Vec<i32> = Vec::new();
        let err = buf
            .try_reserve_exact(usize::MAX)
            .map_err(CdmaError::alloc("test buffer"))
            .unwrap_err();
        assert_eq!(err, CdmaError::OutOfMemory { what: "test buffer" });
    }
}
