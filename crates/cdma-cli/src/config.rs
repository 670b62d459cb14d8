use std::path::Path;

use anyhow::Context;
use cdma_codec::CodecConfig;
use serde::{Deserialize, Serialize};

/// Settings for the `cdma` driver, loadable from a TOML file.
///
/// ```toml
/// messages = ["ping", "pong"]
///
/// [codec]
/// code_length = 16
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub codec: CodecConfig,
    /// Fixture messages used when none are given on the command line.
    pub messages: Vec<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            codec: CodecConfig::default(),
            messages: ["Hello", "Walsh", "codes", "share", "1 air"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl DriverConfig {
    /// Load from `path`, or use the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            code_length = config.codec.code_length,
            "config loaded"
        );
        Ok(config)
    }

    /// Apply a command-line code length override.
    pub fn with_size(mut self, size: Option<usize>) -> Self {
        if let Some(size) = size {
            self.codec.code_length = size;
        }
        self
    }
}
