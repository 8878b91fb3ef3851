//! Morse Decoder: blink timing state machine
//!
//! State transitions:
//! - OPEN → CLOSED: value < blink_threshold (start time recorded once)
//! - CLOSED → OPEN: value ≥ blink_threshold, closed duration becomes a symbol
//!   (< dot_dash_threshold = dot, otherwise dash)
//!
//! Checked on every sample, independent of the transition:
//! - pending symbols and silence > letter_break → resolve one letter
//! - message non-empty and silence > word_break → one space per silence

use log::{debug, info, warn};
use crate::core::MorseTable;
use crate::types::{
    DecoderConfig, DecoderEvent, DecoderOutput, EyeState, FlushPolicy, FrameInput,
    OpennessSample, PendingSequence, Symbol,
};

/// Counters over the lifetime of a decoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DecoderStats {
    /// Samples processed
    pub samples: u64,
    /// Frames skipped because no face was found
    pub skipped_frames: u64,
    pub dots: u64,
    pub dashes: u64,
    /// Letters appended to the message
    pub letters: u64,
    /// Sequences not found in the table
    pub rejected: u64,
    pub word_breaks: u64,
}

/// A completed closed interval
#[derive(Debug, Clone, Copy)]
struct Blink {
    start: f64,
    end: f64,
}

impl Blink {
    fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Blink-to-Morse state machine
#[derive(Debug)]
pub struct MorseDecoder {
    config: DecoderConfig,
    table: MorseTable,
    /// When the current closure started, None while the eye is open
    closed_since: Option<f64>,
    /// Symbols of the letter being entered
    pending: PendingSequence,
    /// End of the last completed blink. Starts at the first sample.
    last_symbol_at: Option<f64>,
    /// Space already added for the current silence
    word_break_inserted: bool,
    /// Decoded text
    message: String,
    stats: DecoderStats,
}

impl Default for MorseDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MorseDecoder {
    /// Create decoder with default thresholds
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    /// Create decoder with custom thresholds
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            table: MorseTable::new(),
            closed_since: None,
            pending: PendingSequence::new(),
            last_symbol_at: None,
            word_break_inserted: false,
            message: String::new(),
            stats: DecoderStats::default(),
        }
    }

    /// Feed one frame. Frames without a face change nothing.
    pub fn process(&mut self, frame: FrameInput) -> Option<DecoderOutput> {
        match frame {
            FrameInput::Sample(sample) => Some(self.advance(sample)),
            FrameInput::NoFace { timestamp } => {
                self.skip_frame(timestamp);
                None
            }
        }
    }

    /// Advance with one openness sample, return everything that happened
    pub fn advance(&mut self, sample: OpennessSample) -> DecoderOutput {
        let now = sample.timestamp;
        let mut events = Vec::new();

        self.stats.samples += 1;
        if self.last_symbol_at.is_none() {
            self.last_symbol_at = Some(now);
        }

        // Open/closed transition
        match EyeState::from_openness(sample.value, self.config.blink_threshold) {
            EyeState::Closed => {
                if self.closed_since.is_none() {
                    self.closed_since = Some(now);
                }
            }
            EyeState::Open => {
                if let Some(start) = self.closed_since.take() {
                    let blink = Blink { start, end: now };
                    events.push(self.complete_blink(blink));
                }
            }
        }

        // Letter break
        let silence = now - self.last_symbol_at.unwrap_or(now);
        if !self.pending.is_empty() && silence > self.config.letter_break_secs {
            events.push(self.resolve_pending());
        }

        // Word break, once per silence
        if !self.message.is_empty()
            && silence > self.config.word_break_secs
            && !self.word_break_inserted
        {
            self.message.push(' ');
            self.word_break_inserted = true;
            self.stats.word_breaks += 1;
            info!("Space added (word break)");
            events.push(DecoderEvent::WordBreakInserted);
        }

        DecoderOutput::new(
            Some(now),
            Some(sample.value),
            self.eye_state(),
            events,
            self.pending.to_string(),
            self.message.clone(),
        )
    }

    /// Record a frame where no face was found.
    /// Timers do not run on these frames; the next sample sees the full gap.
    pub fn skip_frame(&mut self, timestamp: f64) {
        self.stats.skipped_frames += 1;
        debug!("No face at {:.3}s, frame skipped", timestamp);
    }

    /// End of stream: apply the flush policy to any pending sequence.
    /// An unfinished closure is abandoned.
    pub fn finish(&mut self) -> DecoderOutput {
        let mut events = Vec::new();

        if self.closed_since.take().is_some() {
            debug!("Stream ended with eye closed, closure abandoned");
        }

        if !self.pending.is_empty() {
            match self.config.flush {
                FlushPolicy::Resolve => events.push(self.resolve_pending()),
                FlushPolicy::Drop => {
                    let sequence = self.pending.take();
                    warn!("Unfinished sequence dropped: {}", sequence);
                    events.push(DecoderEvent::SequenceDropped { sequence });
                }
            }
        }

        DecoderOutput::new(
            None,
            None,
            self.eye_state(),
            events,
            self.pending.to_string(),
            self.message.clone(),
        )
    }

    fn complete_blink(&mut self, blink: Blink) -> DecoderEvent {
        let duration = blink.duration();
        let symbol = Symbol::classify(duration, self.config.dot_dash_threshold);

        match symbol {
            Symbol::Dot => self.stats.dots += 1,
            Symbol::Dash => self.stats.dashes += 1,
        }
        debug!("{} ({:.3}s)", symbol.label(), duration);

        self.pending.push(symbol);
        self.last_symbol_at = Some(blink.end);
        self.word_break_inserted = false;

        DecoderEvent::SymbolEmitted { symbol, duration }
    }

    /// Look up and clear the pending sequence
    fn resolve_pending(&mut self) -> DecoderEvent {
        let sequence = self.pending.take();
        match self.table.lookup(&sequence) {
            Some(letter) => {
                self.message.push(letter);
                self.stats.letters += 1;
                info!("Letter decoded: {}", letter);
                DecoderEvent::LetterDecoded { letter, sequence }
            }
            None => {
                self.stats.rejected += 1;
                warn!("Invalid Morse sequence: {}", sequence);
                DecoderEvent::LetterRejected { sequence }
            }
        }
    }

    /// Get current eye state
    pub fn eye_state(&self) -> EyeState {
        if self.closed_since.is_some() {
            EyeState::Closed
        } else {
            EyeState::Open
        }
    }

    /// Decoded message so far
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Pending symbols as dots and dashes
    pub fn pending(&self) -> String {
        self.pending.to_string()
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Reset decoder to initial state, keeping the config
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
    }
}

// =============================================================================
// TESTS
// =============================================================================
