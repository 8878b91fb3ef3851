//! Eye state definitions

use serde::{Deserialize, Serialize};

/// The two states of the blink state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EyeState {
    /// Initial state, EAR at or above the blink threshold
    Open,
    /// EAR below the blink threshold, a blink is being timed
    Closed,
}

impl EyeState {
    /// Classify a single openness value
    pub fn from_openness(value: f64, blink_threshold: f64) -> Self {
        if value < blink_threshold {
            EyeState::Closed
        } else {
            EyeState::Open
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            EyeState::Open => "\x1b[32m",   // Green
            EyeState::Closed => "\x1b[33m", // Yellow
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            EyeState::Open => "👁",
            EyeState::Closed => "😑",
        }
    }
}

impl std::fmt::Display for EyeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EyeState::Open => "OPEN",
            EyeState::Closed => "CLOSED",
        };
        write!(f, "{}", name)
    }
}
