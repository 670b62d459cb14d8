use std::sync::Arc;

use cdma_types::{CdmaError, CdmaResult, ChipStream, StationIndex, BITS_PER_CHAR};
use cdma_walsh::CodeSet;
use tracing::{debug, trace, warn};

use crate::bits;

/// Recovers individual stations from a combined chip stream.
///
/// Decoding only reads the stream and the code set, so one receiver can
/// decode any station any number of times, and it can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct Receiver {
    codes: Arc<CodeSet>,
}

impl Receiver {
    pub fn new(codes: Arc<CodeSet>) -> Self {
        Self { codes }
    }

    pub fn code_set(&self) -> &Arc<CodeSet> {
        &self.codes
    }

    /// Number of characters each station carries in `stream`.
    pub fn message_length(&self, stream: &ChipStream) -> CdmaResult<usize> {
        self.check_stream(stream)?;
        Ok(stream.message_length())
    }

    /// Despread `station` and return the raw recovered bytes.
    pub fn decode_station_bytes(
        &self,
        stream: &ChipStream,
        station: usize,
    ) -> CdmaResult<Vec<u8>> {
        let station = StationIndex::new(station);
        self.check_stream(stream)?;
        let code = self.codes.row(station)?;

        let mut message = Vec::new();
        message
            .try_reserve_exact(stream.message_length())
            .map_err(CdmaError::alloc("decoded message"))?;

        let mut silent = 0usize;
        for (index, character) in stream.characters().enumerate() {
            let mut sums = [0i64; BITS_PER_CHAR];
            for (sum, block) in sums.iter_mut().zip(character.chunks_exact(code.len())) {
                *sum = correlate(block, code);
            }
            silent += sums.iter().filter(|&&s| s == 0).count();
            let byte = bits::pack(&sums);
            trace!(%station, index, sums = ?sums, byte, "character despread");
            message.push(byte);
        }

        if silent > 0 {
            warn!(
                %station,
                silent_bits = silent,
                "no signal on station; it was probably never registered"
            );
        }
        debug!(%station, len = message.len(), "station decoded");
        Ok(message)
    }

    /// Despread `station` and return its message as text.
    ///
    /// Bytes that do not form valid UTF-8 are replaced with `U+FFFD`.
    pub fn decode_station(&self, stream: &ChipStream, station: usize) -> CdmaResult<String> {
        let bytes = self.decode_station_bytes(stream, station)?;
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }

    /// Decode stations `0..count` in order.
    ///
    /// Fails as a whole with the first station's error; no partial result is
    /// returned.
    pub fn decode_many(&self, stream: &ChipStream, count: usize) -> CdmaResult<Vec<String>> {
        let mut messages = Vec::new();
        messages
            .try_reserve_exact(count)
            .map_err(CdmaError::alloc("decoded message list"))?;
        for station in 0..count {
            messages.push(self.decode_station(stream, station)?);
        }
        Ok(messages)
    }

    fn check_stream(&self, stream: &ChipStream) -> CdmaResult<()> {
        if stream.code_length() != self.codes.size() {
            return Err(CdmaError::CodeLengthMismatch {
                expected: self.codes.size(),
                actual: stream.code_length(),
            });
        }
        Ok(())
    }
}

/// Correlate one `n`-chip block with a station's code.
///
/// With exact orthogonal codes the result is `+n` or `-n` for a station that
/// transmitted this bit, and `0` for a station that did not. Accumulates in
/// `i64`: each term is at most `2^31` in magnitude and a code matrix cannot
/// have `2^32` rows, so arbitrary chip values never overflow.
pub fn correlate(block: &[i32], code: &[i8]) -> i64 {
    block
        .iter()
        .zip(code)
        .map(|(&chip, &c)| i64::from(chip) * i64::from(c))
        .sum()
}
