//! Decoder events
//!
//! Everything the decoder does that a caller may want to show or log is
//! reported as one of these, in the order it happened within a sample.

use serde::{Deserialize, Serialize};
use crate::types::Symbol;

/// Events produced while advancing the decoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecoderEvent {
    /// A blink completed and was classified
    SymbolEmitted {
        symbol: Symbol,
        /// Closed duration in seconds
        duration: f64,
    },
    /// Letter-break silence resolved the pending sequence to a character
    LetterDecoded {
        letter: char,
        sequence: String,
    },
    /// Letter-break silence hit a sequence that is not in the table
    LetterRejected {
        sequence: String,
    },
    /// Word-break silence appended a space
    WordBreakInserted,
    /// Stream ended with an unresolved sequence that was discarded
    SequenceDropped {
        sequence: String,
    },
}

impl DecoderEvent {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::SymbolEmitted { .. } => "M100_SYMBOL_EMITTED",
            Self::LetterDecoded { .. } => "M200_LETTER_DECODED",
            Self::LetterRejected { .. } => "M201_LETTER_REJECTED",
            Self::WordBreakInserted => "M300_WORD_BREAK",
            Self::SequenceDropped { .. } => "M400_SEQUENCE_DROPPED",
        }
    }

    /// Human-readable line for the diagnostic stream
    pub fn description(&self) -> String {
        match self {
            Self::SymbolEmitted { symbol, .. } => symbol.label().to_string(),
            Self::LetterDecoded { letter, .. } => format!("Letter decoded: {}", letter),
            Self::LetterRejected { .. } => "Invalid Morse sequence".to_string(),
            Self::WordBreakInserted => "Space added (word break)".to_string(),
            Self::SequenceDropped { .. } => "Unfinished sequence dropped".to_string(),
        }
    }

    /// Did this event change the decoded message?
    pub fn changes_message(&self) -> bool {
        matches!(self, Self::LetterDecoded { .. } | Self::WordBreakInserted)
    }
}

impl std::fmt::Display for DecoderEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SymbolEmitted { symbol, duration } => {
                write!(f, "{} ({:.2}s)", symbol.label(), duration)
            }
            Self::LetterRejected { sequence } | Self::SequenceDropped { sequence } => {
                write!(f, "{}: {}", self.description(), sequence)
            }
            Self::LetterDecoded { sequence, .. } => {
                write!(f, "{} ({})", self.description(), sequence)
            }
            Self::WordBreakInserted => write!(f, "{}", self.description()),
        }
    }
}
