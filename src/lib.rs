//! Blinkmorse: blink-to-Morse decoder
//!
//! Eye landmarks → EAR estimator → MorseDecoder → decoded text

pub mod core;
pub mod types;

// =============================================================================
// DECODER THRESHOLDS [C]
// =============================================================================

/// EAR below this value means the eye is closed
pub const BLINK_THRESHOLD: f64 = 0.23;

/// Closed duration (seconds) separating a dot from a dash.
/// Shorter = dot, equal or longer = dash
pub const DOT_DASH_THRESHOLD_SECS: f64 = 0.3;

/// Silence (seconds) after the last blink that closes the current letter
pub const LETTER_BREAK_SECS: f64 = 1.2;

/// Silence (seconds) after the last blink that inserts a word break
pub const WORD_BREAK_SECS: f64 = 2.5;

// =============================================================================
// ESTIMATOR
// =============================================================================

/// EAR reported for degenerate eye geometry (zero eye width).
/// Well above any closed threshold, so the frame reads as open
pub const DEGENERATE_EAR: f64 = 1.0;

/// Face-mesh landmark indices for the left eye (p1..p6)
pub const LEFT_EYE: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// Face-mesh landmark indices for the right eye (p1..p6)
pub const RIGHT_EYE: [usize; 6] = [362, 385, 387, 263, 373, 380];

// =============================================================================
// OUTPUT
// =============================================================================

/// File the final message is written to on clean shutdown
pub const DEFAULT_OUTPUT_FILE: &str = "decoded_message.txt";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
