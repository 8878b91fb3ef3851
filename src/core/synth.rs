//! Synthesizer: text → frame-sampled openness timeline
//!
//! Produces what a camera would see if someone blinked the text in Morse,
//! at a fixed frame rate. Timings default to values that sit clearly on
//! each side of the decoder's default thresholds.

use serde::{Deserialize, Serialize};
use crate::core::MorseTable;
use crate::types::{BlinkError, ErrorReason, OpennessSample, Symbol};

/// Highest frame rate a timeline is generated at
pub const MAX_FRAME_RATE: f64 = 1000.0;

/// Longest single open or closed run (seconds)
pub const MAX_RUN_SECS: f64 = 60.0;

/// Timeline shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Frames per second
    pub frame_rate: f64,
    /// Closed time for a dot (seconds)
    pub dot_secs: f64,
    /// Closed time for a dash (seconds)
    pub dash_secs: f64,
    /// Open time between symbols of one letter
    pub symbol_gap_secs: f64,
    /// Open time between letters of one word
    pub letter_gap_secs: f64,
    /// Open time between words
    pub word_gap_secs: f64,
    /// Open time before the first blink
    pub lead_in_secs: f64,
    /// EAR while open
    pub open_value: f64,
    /// EAR while closed
    pub closed_value: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            dot_secs: 0.1,
            dash_secs: 0.5,
            symbol_gap_secs: 0.3,
            letter_gap_secs: 1.5,
            word_gap_secs: 3.0,
            lead_in_secs: 0.5,
            open_value: 0.32,
            closed_value: 0.12,
        }
    }
}

impl SynthConfig {
    /// Reject shapes whose frame counts would not fit a timeline
    pub fn validate(&self) -> Result<(), BlinkError> {
        let invalid = |detail: String| Err(BlinkError::new(ErrorReason::E003_CONFIG_INVALID, detail));

        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 || self.frame_rate > MAX_FRAME_RATE {
            return invalid(format!(
                "frame_rate must be in (0, {}], got {}",
                MAX_FRAME_RATE, self.frame_rate
            ));
        }
        for (name, secs) in [
            ("dot_secs", self.dot_secs),
            ("dash_secs", self.dash_secs),
            ("symbol_gap_secs", self.symbol_gap_secs),
            ("letter_gap_secs", self.letter_gap_secs),
            ("word_gap_secs", self.word_gap_secs),
            ("lead_in_secs", self.lead_in_secs),
        ] {
            if !secs.is_finite() || secs < 0.0 || secs > MAX_RUN_SECS {
                return invalid(format!("{} must be in [0, {}], got {}", name, MAX_RUN_SECS, secs));
            }
        }
        Ok(())
    }

    fn frames(&self, secs: f64) -> usize {
        (secs * self.frame_rate).round().max(1.0) as usize
    }
}

/// Encode text as an openness timeline.
/// Whitespace separates words; every other character must be in the table.
/// The timeline ends with one letter gap of open eye, so the last letter
/// resolves without a flush.
pub fn synthesize(text: &str, config: &SynthConfig) -> Result<Vec<OpennessSample>, BlinkError> {
    config.validate()?;

    let table = MorseTable::new();
    let words: Vec<Vec<Vec<Symbol>>> = text
        .split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| {
                    table
                        .encode(c)
                        .map(|code| code.chars().filter_map(Symbol::from_char).collect::<Vec<Symbol>>())
                        .ok_or_else(|| {
                            BlinkError::new(ErrorReason::E201_UNENCODABLE, format!("'{}'", c))
                        })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Runs of (closed?, frame count)
    let mut runs: Vec<(bool, usize)> = vec![(false, config.frames(config.lead_in_secs))];
    for (w, word) in words.iter().enumerate() {
        if w > 0 {
            runs.push((false, config.frames(config.word_gap_secs)));
        }
        for (l, letter) in word.iter().enumerate() {
            if l > 0 {
                runs.push((false, config.frames(config.letter_gap_secs)));
            }
            for (s, symbol) in letter.iter().enumerate() {
                if s > 0 {
                    runs.push((false, config.frames(config.symbol_gap_secs)));
                }
                let secs = match symbol {
                    Symbol::Dot => config.dot_secs,
                    Symbol::Dash => config.dash_secs,
                };
                runs.push((true, config.frames(secs)));
            }
        }
    }
    // One extra frame so the last silence strictly exceeds the gap
    runs.push((false, config.frames(config.letter_gap_secs) + 1));

    let mut samples = Vec::with_capacity(runs.iter().map(|(_, n)| n).sum());
    let mut frame = 0usize;
    for (closed, count) in runs {
        let value = if closed { config.closed_value } else { config.open_value };
        for _ in 0..count {
            samples.push(OpennessSample::new(frame as f64 / config.frame_rate, value));
            frame += 1;
        }
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dot_shape() {
        let config = SynthConfig::default();
        let samples = synthesize("E", &config).unwrap();
        let closed = samples.iter().filter(|s| s.value == config.closed_value).count();
        assert_eq!(closed, 3);
        // lead-in 15 + dot 3 + tail 46
        assert_eq!(samples.len(), 15 + 3 + 46);
        assert_eq!(samples[0].value, config.open_value);
    }

    #[test]
    fn test_timestamps_are_frame_aligned() {
        let samples = synthesize("T", &SynthConfig::default()).unwrap();
        for (i, s) in samples.iter().enumerate() {
            assert_eq!(s.timestamp, i as f64 / 30.0);
        }
    }

    #[test]
    fn test_lowercase_accepted() {
        assert_eq!(
            synthesize("sos", &SynthConfig::default()).unwrap(),
            synthesize("SOS", &SynthConfig::default()).unwrap()
        );
    }

    #[test]
    fn test_unencodable_character() {
        let err = synthesize("HI!", &SynthConfig::default()).unwrap_err();
        assert_eq!(err.reason, ErrorReason::E201_UNENCODABLE);
        assert!(err.detail.contains('!'));
    }

    #[test]
    fn test_rejects_unusable_frame_rates() {
        for frame_rate in [0.0, -30.0, f64::NAN, f64::INFINITY, 1e300, MAX_FRAME_RATE + 1.0] {
            let config = SynthConfig { frame_rate, ..SynthConfig::default() };
            let err = synthesize("E", &config).unwrap_err();
            assert_eq!(err.reason, ErrorReason::E003_CONFIG_INVALID, "fps {}", frame_rate);
        }
        let fastest = SynthConfig { frame_rate: MAX_FRAME_RATE, ..SynthConfig::default() };
        assert!(synthesize("E", &fastest).is_ok());
    }

    #[test]
    fn test_rejects_unusable_durations() {
        let config = SynthConfig { word_gap_secs: 1e12, ..SynthConfig::default() };
        assert_eq!(synthesize("A B", &config).unwrap_err().reason, ErrorReason::E003_CONFIG_INVALID);
        let config = SynthConfig { dot_secs: -0.1, ..SynthConfig::default() };
        assert!(synthesize("E", &config).is_err());
    }

    #[test]
    fn test_empty_text_is_all_open() {
        let config = SynthConfig::default();
        let samples = synthesize("   ", &config).unwrap();
        assert!(samples.iter().all(|s| s.value == config.open_value));
    }
}
