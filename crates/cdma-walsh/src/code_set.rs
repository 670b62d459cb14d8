use std::fmt;

use cdma_types::{CdmaError, CdmaResult, StationIndex};
use tracing::{debug, trace};

use crate::hadamard;

/// The shared code matrix (the "base station").
///
/// Holds the `n × n` Walsh-Hadamard matrix and resolves station indices to
/// their spreading code. Immutable after construction; share it between a
/// transmitter and any number of receivers behind an `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeSet {
    size: usize,
    codes: Vec<i8>,
}

impl CodeSet {
    /// Generate the code set of order `n`.
    ///
    /// Fails with an invalid-argument error unless `n` is a power of two.
    pub fn new(n: usize) -> CdmaResult<Self> {
        let codes = hadamard::generate(n)?;
        debug!(size = n, "walsh code set generated");
        let set = Self { size: n, codes };
        for (i, row) in set.rows().enumerate() {
            trace!(station = i, code = ?row, "walsh code");
        }
        Ok(set)
    }

    /// Number of codes, which is also the length of each code.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Spreading code for `station`.
    pub fn row(&self, station: StationIndex) -> CdmaResult<&[i8]> {
        let i = station.get();
        if i >= self.size {
            return Err(CdmaError::StationOutOfRange {
                station: i,
                available: self.size,
            });
        }
        Ok(&self.codes[i * self.size..(i + 1) * self.size])
    }

    /// All codes in station order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[i8]> {
        self.codes.chunks_exact(self.size)
    }

    /// Check pairwise orthogonality and per-row energy over the whole matrix.
    pub fn is_orthogonal(&self) -> bool {
        let n = self.size as i32;
        self.rows().enumerate().all(|(i, a)| {
            self.rows().enumerate().all(|(j, b)| {
                let expected = if i == j { n } else { 0 };
                dot(a, b) == expected
            })
        })
    }
}

/// Dot product of two codes of equal length.
///
/// # Panics
///
/// Panics if `a` and `b` have different lengths.
pub fn dot(a: &[i8], b: &[i8]) -> i32 {
    assert_eq!(a.len(), b.len(), "codes must have the same length");
    a.iter().zip(b).map(|(&x, &y)| x as i32 * y as i32).sum()
}

impl fmt::Debug for CodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeSet").field("size", &self.size).finish()
    }
}

/// One row per line, values separated by single spaces.
impl fmt::Display for CodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, chip) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{chip}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdma_types::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn accepts_powers_of_two() {
        for n in [1, 2, 4, 8, 16, 32] {
            let set = CodeSet::new(n).unwrap();
            assert_eq!(set.size(), n);
            assert_eq!(set.rows().len(), n);
        }
    }

    #[test]
    fn rejects_other_sizes() {
        for n in [0, 3, 5, 6, 7, 9] {
            let err = CodeSet::new(n).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn row_lookup_is_bounds_checked() {
        let set = CodeSet::new(4).unwrap();
        assert_eq!(set.row(StationIndex::new(1)).unwrap(), &[1, -1, 1, -1]);
        assert_eq!(
            set.row(StationIndex::new(4)),
            Err(CdmaError::StationOutOfRange { station: 4, available: 4 })
        );
    }

    #[test]
    fn display_prints_matrix() {
        let set = CodeSet::new(2).unwrap();
        assert_eq!(set.to_string(), "1 1\n1 -1");
    }

    #[test]
    fn dot_of_distinct_rows_is_zero() {
        let set = CodeSet::new(8).unwrap();
        let a = set.row(StationIndex::new(2)).unwrap();
        let b = set.row(StationIndex::new(5)).unwrap();
        assert_eq!(dot(a, b), 0);
        assert_eq!(dot(a, a), 8);
    }

    #[test]
    #[should_panic(expected = "codes must have the same length")]
    fn dot_panics_on_length_mismatch() {
        dot(&[1, 1], &[1]);
    }

    #[test]
    fn order_128_is_orthogonal() {
        assert!(CodeSet::new(128).unwrap().is_orthogonal());
    }

    proptest! {
        #[test]
        fn every_supported_order_is_orthogonal(order in 0u32..=6) {
            let set = CodeSet::new(1usize << order).unwrap();
            prop_assert!(set.is_orthogonal());
        }

        #[test]
        fn rows_hold_only_unit_chips(order in 0u32..=6) {
            let set = CodeSet::new(1usize << order).unwrap();
            prop_assert!(set.rows().flatten().all(|&c| c == 1 || c == -1));
        }
    }
}
