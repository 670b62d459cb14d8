use std::sync::Arc;

use cdma_types::{CdmaError, CdmaResult, ChipStream, StationIndex, BITS_PER_CHAR};
use cdma_walsh::CodeSet;
use tracing::{debug, trace};

use crate::bits;

/// Accumulates one message per station and spreads them onto one channel.
///
/// Stations are numbered in registration order: the first registered message
/// is spread with code row 0, the next with row 1, and so on. All messages
/// must have the same length, fixed by the first registration.
#[derive(Debug, Clone)]
pub struct Transmitter {
    codes: Arc<CodeSet>,
    stations: Vec<Vec<i8>>,
    message_length: Option<usize>,
}

impl Transmitter {
    pub fn new(codes: Arc<CodeSet>) -> Self {
        Self {
            codes,
            stations: Vec::new(),
            message_length: None,
        }
    }

    pub fn code_set(&self) -> &Arc<CodeSet> {
        &self.codes
    }

    /// Maximum number of stations, one per code.
    pub fn capacity(&self) -> usize {
        self.codes.size()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Character length shared by every registered message, if any.
    pub fn message_length(&self) -> Option<usize> {
        self.message_length
    }

    /// Register `message` as the next station and return its index.
    ///
    /// A rejected registration leaves the transmitter unchanged.
    pub fn register_message(&mut self, message: impl AsRef<[u8]>) -> CdmaResult<StationIndex> {
        let message = message.as_ref();
        if self.stations.len() >= self.capacity() {
            return Err(CdmaError::TooManyStations {
                capacity: self.capacity(),
            });
        }
        if let Some(expected) = self.message_length {
            if message.len() != expected {
                return Err(CdmaError::BadMessageSize {
                    expected,
                    actual: message.len(),
                });
            }
        }

        let signs = bits::to_signs(message)?;
        self.stations
            .try_reserve(1)
            .map_err(CdmaError::alloc("station registry"))?;

        let station = StationIndex::new(self.stations.len());
        trace!(%station, signs = ?signs, "station bit signs");
        self.stations.push(signs);
        if self.message_length.is_none() {
            self.message_length = Some(message.len());
        }
        debug!(%station, len = message.len(), "station registered");
        Ok(station)
    }

    /// Spread every registered station with its code and sum the results.
    ///
    /// The stream holds `message_length × 8 × n` chips regardless of how
    /// many stations are registered; with no stations it is empty.
    pub fn send(&self) -> CdmaResult<ChipStream> {
        let n = self.codes.size();
        let len = self
            .message_length
            .unwrap_or(0)
            .checked_mul(BITS_PER_CHAR * n)
            .ok_or(CdmaError::OutOfMemory { what: "chip stream" })?;

        let mut chips = Vec::new();
        chips
            .try_reserve_exact(len)
            .map_err(CdmaError::alloc("chip stream"))?;
        chips.resize(len, 0);

        for (i, signs) in self.stations.iter().enumerate() {
            let code = self.codes.row(StationIndex::new(i))?;
            spread_into(&mut chips, signs, code);
        }
        trace!(chips = ?chips, "combined chip stream");
        debug!(stations = self.stations.len(), chips = len, "chip stream sent");

        ChipStream::new(chips, n)
    }
}

/// Add `sign[j] × code[k]` onto chip `j × n + k` for every bit `j`.
fn spread_into(chips: &mut [i32], signs: &[i8], code: &[i8]) {
    for (block, &sign) in chips.chunks_exact_mut(code.len()).zip(signs) {
        for (chip, &c) in block.iter_mut().zip(code) {
            *chip += i32::from(sign) * i32::from(c);
        }
    }
}
