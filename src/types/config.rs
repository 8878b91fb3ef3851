//! Decoder configuration

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::types::{BlinkError, ErrorReason};
use crate::{BLINK_THRESHOLD, DOT_DASH_THRESHOLD_SECS, LETTER_BREAK_SECS, WORD_BREAK_SECS};

/// What to do with an unresolved sequence when the stream ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlushPolicy {
    /// Discard it (a trailing partial letter never shows up)
    #[default]
    Drop,
    /// Resolve it through the table as if the letter break had elapsed
    Resolve,
}

impl std::str::FromStr for FlushPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drop" => Ok(FlushPolicy::Drop),
            "resolve" => Ok(FlushPolicy::Resolve),
            other => Err(format!("unknown flush policy '{}' (expected drop or resolve)", other)),
        }
    }
}

/// Timing thresholds for the decoder. Missing fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// EAR below this = eye closed
    pub blink_threshold: f64,
    /// Closed duration below this = dot, at or above = dash (seconds)
    pub dot_dash_threshold: f64,
    /// Silence that resolves the pending letter (seconds)
    pub letter_break_secs: f64,
    /// Silence that inserts a word break (seconds)
    pub word_break_secs: f64,
    /// End-of-stream handling of a pending sequence
    pub flush: FlushPolicy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            blink_threshold: BLINK_THRESHOLD,
            dot_dash_threshold: DOT_DASH_THRESHOLD_SECS,
            letter_break_secs: LETTER_BREAK_SECS,
            word_break_secs: WORD_BREAK_SECS,
            flush: FlushPolicy::Drop,
        }
    }
}

impl DecoderConfig {
    /// Load from a JSON file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BlinkError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            BlinkError::new(ErrorReason::E001_CONFIG_READ, format!("{}: {}", path.display(), e))
        })?;
        let config: DecoderConfig = serde_json::from_str(&json).map_err(|e| {
            BlinkError::new(ErrorReason::E002_CONFIG_PARSE, format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all thresholds are usable
    pub fn validate(&self) -> Result<(), BlinkError> {
        let invalid = |msg: String| -> Result<(), BlinkError> {
            Err(BlinkError::new(ErrorReason::E003_CONFIG_INVALID, msg))
        };

        if !self.blink_threshold.is_finite() || self.blink_threshold <= 0.0 {
            return invalid(format!("blink_threshold must be > 0, got {}", self.blink_threshold));
        }
        for (name, value) in [
            ("dot_dash_threshold", self.dot_dash_threshold),
            ("letter_break_secs", self.letter_break_secs),
            ("word_break_secs", self.word_break_secs),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{} must be > 0, got {}", name, value));
            }
        }
        // A word break before the letter break would split words mid-letter
        if self.word_break_secs <= self.letter_break_secs {
            return invalid(format!(
                "word_break_secs ({}) must exceed letter_break_secs ({})",
                self.word_break_secs, self.letter_break_secs
            ));
        }
        Ok(())
    }
}
