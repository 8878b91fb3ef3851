//! Output structures for terminal display

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use colored::Colorize;
use crate::types::{DecoderEvent, EyeState};

/// Output structure for each decoder step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderOutput {
    /// Wall-clock time the step was processed
    pub emitted_at: DateTime<Utc>,
    /// Stream timestamp of the sample (seconds), None for the final flush
    pub t: Option<f64>,
    /// Openness value of the sample
    pub value: Option<f64>,
    /// Eye state after the sample
    pub eye_state: EyeState,
    /// Events in the order they happened
    pub events: Vec<DecoderEvent>,
    /// Pending sequence after the step, as dots and dashes
    pub pending: String,
    /// Decoded message so far
    pub message: String,
}

impl DecoderOutput {
    /// Create new output
    pub fn new(
        t: Option<f64>,
        value: Option<f64>,
        eye_state: EyeState,
        events: Vec<DecoderEvent>,
        pending: String,
        message: String,
    ) -> Self {
        Self {
            emitted_at: Utc::now(),
            t,
            value,
            eye_state,
            events,
            pending,
            message,
        }
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Did any event in this step change the message?
    pub fn message_changed(&self) -> bool {
        self.events.iter().any(DecoderEvent::changes_message)
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let time = self.time_label();
        let mut lines = Vec::with_capacity(self.events.len() + 1);
        for event in &self.events {
            let line = match event {
                DecoderEvent::SymbolEmitted { .. } => format!("· {}", event).as_str().cyan(),
                DecoderEvent::LetterDecoded { .. } => format!("✓ {}", event).as_str().green().bold(),
                DecoderEvent::LetterRejected { .. } => format!("✗ {}", event).as_str().red(),
                DecoderEvent::WordBreakInserted => format!("␣ {}", event).as_str().blue(),
                DecoderEvent::SequenceDropped { .. } => format!("… {}", event).as_str().bright_black(),
            };
            lines.push(format!("{} {}", time.as_str().bright_black(), line));
        }
        if self.events.is_empty() {
            lines.push(format!(
                "{} {}{} {}{} pending={:?}",
                time.as_str().bright_black(),
                self.eye_state.color_code(),
                self.eye_state.emoji(),
                self.eye_state,
                EyeState::color_reset(),
                self.pending,
            ));
        }
        lines.join("\n")
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let events = self
            .events
            .iter()
            .map(|e| e.code())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "t={} | value={} | eye={} | pending={:?} | events={} | message={:?}",
            self.time_label(),
            self.value.map(|v| format!("{:.3}", v)).unwrap_or_else(|| "-".into()),
            self.eye_state,
            self.pending,
            if events.is_empty() { "-".to_string() } else { events },
            self.message,
        )
    }

    fn time_label(&self) -> String {
        match self.t {
            Some(t) => format!("{:>8.3}s", t),
            None => "     end".to_string(),
        }
    }
}
