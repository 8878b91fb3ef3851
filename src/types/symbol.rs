//! Morse symbols and the in-progress letter

use serde::{Deserialize, Serialize};

/// One Morse element produced by a completed blink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    /// Classify a closed-eye duration. Exactly at the threshold is a dash.
    pub fn classify(duration_secs: f64, dot_dash_threshold: f64) -> Self {
        if duration_secs < dot_dash_threshold {
            Symbol::Dot
        } else {
            Symbol::Dash
        }
    }

    /// Character used in table keys
    pub fn as_char(&self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }

    /// Parse a single `.` or `-`
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            _ => None,
        }
    }

    /// Label used in the diagnostic stream
    pub fn label(&self) -> &'static str {
        match self {
            Symbol::Dot => "Dot",
            Symbol::Dash => "Dash",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Symbols accumulated for the current letter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSequence {
    symbols: Vec<Symbol>,
}

impl PendingSequence {
    /// Create empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a symbol
    pub fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Take the accumulated symbols as a table key, leaving the sequence empty
    pub fn take(&mut self) -> String {
        let key = self.to_string();
        self.symbols.clear();
        key
    }
}

impl std::fmt::Display for PendingSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for PendingSequence {
    type Err = char;

    /// Parse a dot/dash string; the error is the first offending character
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols = s
            .chars()
            .map(|c| Symbol::from_char(c).ok_or(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { symbols })
    }
}
