use std::sync::Arc;

use cdma_types::{CdmaResult, ChipStream, StationIndex};
use cdma_walsh::CodeSet;
use tracing::info;

use crate::config::CodecConfig;
use crate::receiver::Receiver;
use crate::transmitter::Transmitter;

/// A transmitter and receiver bound to the same code set.
///
/// Convenience for the common single-process round-trip: register messages,
/// send once, decode every registered station.
#[derive(Debug, Clone)]
pub struct Channel {
    transmitter: Transmitter,
    receiver: Receiver,
}

/// Outcome of [`Channel::round_trip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    pub stream: ChipStream,
    pub decoded: Vec<String>,
}

impl Channel {
    pub fn new(config: &CodecConfig) -> CdmaResult<Self> {
        Ok(Self::with_code_set(config.build_code_set()?))
    }

    pub fn with_code_set(codes: Arc<CodeSet>) -> Self {
        Self {
            transmitter: Transmitter::new(codes.clone()),
            receiver: Receiver::new(codes),
        }
    }

    pub fn transmitter(&self) -> &Transmitter {
        &self.transmitter
    }

    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    pub fn code_set(&self) -> &Arc<CodeSet> {
        self.transmitter.code_set()
    }

    pub fn register(&mut self, message: impl AsRef<[u8]>) -> CdmaResult<StationIndex> {
        self.transmitter.register_message(message)
    }

    /// Send the registered stations and decode all of them back.
    pub fn round_trip(&self) -> CdmaResult<RoundTrip> {
        let stream = self.transmitter.send()?;
        let decoded = self
            .receiver
            .decode_many(&stream, self.transmitter.station_count())?;
        info!(
            stations = decoded.len(),
            chips = stream.len(),
            "round trip complete"
        );
        Ok(RoundTrip { stream, decoded })
    }
}
