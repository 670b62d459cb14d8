use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a station in the code matrix.
///
/// Station `i` spreads and despreads with row `i` of the code set. Indices are
/// assigned in registration order by the transmitter; whether an index is in
/// range is decided by the code set that resolves it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationIndex(usize);

impl StationIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Debug for StationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationIndex({})", self.0)
    }
}

impl fmt::Display for StationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for StationIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<StationIndex> for usize {
    fn from(index: StationIndex) -> Self {
        index.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_hash_prefix() {
        assert_eq!(StationIndex::new(3).to_string(), "#3");
    }

    #[test]
    fn conversions_preserve_value() {
        let idx: StationIndex = 5usize.into();
        assert_eq!(idx.get(), 5);
        assert_eq!(usize::from(idx), 5);
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&StationIndex::new(7)).unwrap();
        assert_eq!(json, "7");
        let parsed: StationIndex = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, StationIndex::new(7));
    }
}
