use serde::{Deserialize, Serialize};

use crate::error::{CdmaError, CdmaResult};

/// Bits carried by one message character, most significant first.
pub const BITS_PER_CHAR: usize = 8;

/// The combined signal on the shared channel.
///
/// A chip stream is `message_length × 8` consecutive blocks of `code_length`
/// chips. Block `(c, b)` holds the superposition, over every registered
/// station, of that station's sign for bit `b` of character `c` times its
/// code. The stream is immutable once built so any number of receivers can
/// decode from the same instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChipStream")]
pub struct ChipStream {
    code_length: usize,
    chips: Vec<i32>,
}

#[derive(Deserialize)]
struct RawChipStream {
    code_length: usize,
    chips: Vec<i32>,
}

impl TryFrom<RawChipStream> for ChipStream {
    type Error = CdmaError;

    fn try_from(raw: RawChipStream) -> CdmaResult<Self> {
        Self::new(raw.chips, raw.code_length)
    }
}

impl ChipStream {
    /// Wrap a chip buffer spread with `code_length`-chip codes.
    ///
    /// The buffer must hold a whole number of characters, i.e. its length is
    /// a multiple of `8 × code_length`.
    pub fn new(chips: Vec<i32>, code_length: usize) -> CdmaResult<Self> {
        let block = match code_length.checked_mul(BITS_PER_CHAR) {
            Some(block) if block > 0 => block,
            _ => return Err(CdmaError::InvalidCodeLength { n: code_length }),
        };
        if chips.len() % block != 0 {
            return Err(CdmaError::StreamLengthMismatch {
                len: chips.len(),
                block,
            });
        }
        Ok(Self { code_length, chips })
    }

    /// A stream carrying zero characters.
    pub fn empty(code_length: usize) -> CdmaResult<Self> {
        Self::new(Vec::new(), code_length)
    }

    /// Length of the spreading codes this stream was built with.
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Number of characters each station's message occupies.
    pub fn message_length(&self) -> usize {
        self.chips.len() / self.char_len()
    }

    /// Chips per character. Cannot overflow: `new` rejects such lengths.
    fn char_len(&self) -> usize {
        BITS_PER_CHAR * self.code_length
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    pub fn chips(&self) -> &[i32] {
        &self.chips
    }

    /// The `code_length` chips carrying bit `bit` of character `char_index`.
    pub fn block(&self, char_index: usize, bit: usize) -> Option<&[i32]> {
        if bit >= BITS_PER_CHAR || char_index >= self.message_length() {
            return None;
        }
        let start = (char_index * BITS_PER_CHAR + bit) * self.code_length;
        self.chips.get(start..start + self.code_length)
    }

    /// Iterate over the per-character super-blocks of `8 × code_length` chips.
    pub fn characters(&self) -> impl Iterator<Item = &[i32]> {
        self.chips.chunks_exact(self.char_len())
    }

    pub fn into_chips(self) -> Vec<i32> {
        self.chips
    }
}
