use std::sync::Arc;

use cdma_types::{CdmaError, CdmaResult};
use cdma_walsh::CodeSet;
use serde::{Deserialize, Serialize};

/// Configuration for a CDMA channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Length of each Walsh code, which is also the number of stations the
    /// channel can carry. Must be a power of two.
    pub code_length: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { code_length: 8 }
    }
}

impl CodecConfig {
    pub fn with_code_length(code_length: usize) -> Self {
        Self { code_length }
    }

    pub fn validate(&self) -> CdmaResult<()> {
        if !self.code_length.is_power_of_two() {
            return Err(CdmaError::InvalidCodeLength {
                n: self.code_length,
            });
        }
        Ok(())
    }

    /// Generate the shared code set; fails like [`validate`](Self::validate)
    /// on a bad length.
    pub fn build_code_set(&self) -> CdmaResult<Arc<CodeSet>> {
        Ok(Arc::new(CodeSet::new(self.code_length)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_eight_chip_codes() {
        assert_eq!(CodecConfig::default().code_length, 8);
        assert!(CodecConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_power_of_two() {
        let err = CodecConfig::with_code_length(6).validate().unwrap_err();
        assert_eq!(err, CdmaError::InvalidCodeLength { n: 6 });
    }

    #[test]
    fn build_code_set_uses_length() {
        let codes = CodecConfig::with_code_length(16).build_code_set().unwrap();
        assert_eq!(codes.size(), 16);
    }

    #[test]
    fn build_code_set_rejects_bad_length() {
        let err = CodecConfig::with_code_length(12).build_code_set().unwrap_err();
        assert_eq!(err, CdmaError::InvalidCodeLength { n: 12 });
    }

    #[test]
    fn missing_fields_fall_back_to_default() {
        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn serde_roundtrip() {
        let config = CodecConfig::with_code_length(32);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CodecConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
