//! Error reasons for the decoder's outer surfaces
//!
//! Decoding itself never fails. These cover config, input streams,
//! text synthesis and saving the message.

use serde::{Deserialize, Serialize};

/// Reason codes for failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ErrorReason {
    // =========================================================================
    // E0xx: Configuration
    // =========================================================================
    /// Config file could not be read
    E001_CONFIG_READ,
    /// Config file is not valid JSON for DecoderConfig
    E002_CONFIG_PARSE,
    /// Config values out of range
    E003_CONFIG_INVALID,

    // =========================================================================
    // E1xx: Input stream
    // =========================================================================
    /// Input could not be read
    E101_STREAM_READ,
    /// A frame record could not be parsed
    E102_STREAM_PARSE,

    // =========================================================================
    // E2xx: Synthesis
    // =========================================================================
    /// Text contains a character with no Morse code
    E201_UNENCODABLE,

    // =========================================================================
    // E3xx: Output
    // =========================================================================
    /// Decoded message could not be written
    E301_SAVE_FAILED,
}

impl ErrorReason {
    /// Get code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::E001_CONFIG_READ => "E001_CONFIG_READ",
            Self::E002_CONFIG_PARSE => "E002_CONFIG_PARSE",
            Self::E003_CONFIG_INVALID => "E003_CONFIG_INVALID",
            Self::E101_STREAM_READ => "E101_STREAM_READ",
            Self::E102_STREAM_PARSE => "E102_STREAM_PARSE",
            Self::E201_UNENCODABLE => "E201_UNENCODABLE",
            Self::E301_SAVE_FAILED => "E301_SAVE_FAILED",
        }
    }

    /// Get description
    pub fn description(&self) -> &'static str {
        match self {
            Self::E001_CONFIG_READ => "Failed to read config file",
            Self::E002_CONFIG_PARSE => "Failed to parse config file",
            Self::E003_CONFIG_INVALID => "Invalid decoder config",
            Self::E101_STREAM_READ => "Failed to read input stream",
            Self::E102_STREAM_PARSE => "Malformed frame record",
            Self::E201_UNENCODABLE => "Character has no Morse code",
            Self::E301_SAVE_FAILED => "Failed to save decoded message",
        }
    }
}

impl std::fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Failure with its reason and context
#[derive(Debug, Clone, PartialEq)]
pub struct BlinkError {
    pub reason: ErrorReason,
    pub detail: String,
    /// 1-based input line, for stream errors
    pub line: Option<usize>,
}

impl BlinkError {
    pub fn new(reason: ErrorReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
            line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl std::fmt::Display for BlinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} (line {}): {}", self.reason, line, self.detail),
            None => write!(f, "{}: {}", self.reason, self.detail),
        }
    }
}

impl std::error::Error for BlinkError {}
