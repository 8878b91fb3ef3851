//! Morse table: International Morse code for A-Z and 0-9
//!
//! Built once on first use, never mutated.

use std::collections::HashMap;
use lazy_static::lazy_static;

/// (code, character) pairs, the single source for both directions
const MORSE_CODES: [(&str, char); 36] = [
    (".-", 'A'), ("-...", 'B'), ("-.-.", 'C'), ("-..", 'D'), (".", 'E'),
    ("..-.", 'F'), ("--.", 'G'), ("....", 'H'), ("..", 'I'), (".---", 'J'),
    ("-.-", 'K'), (".-..", 'L'), ("--", 'M'), ("-.", 'N'), ("---", 'O'),
    (".--.", 'P'), ("--.-", 'Q'), (".-.", 'R'), ("...", 'S'), ("-", 'T'),
    ("..-", 'U'), ("...-", 'V'), (".--", 'W'), ("-..-", 'X'), ("-.--", 'Y'),
    ("--..", 'Z'),
    ("-----", '0'), (".----", '1'), ("..---", '2'), ("...--", '3'), ("....-", '4'),
    (".....", '5'), ("-....", '6'), ("--...", '7'), ("---..", '8'), ("----.", '9'),
];

lazy_static! {
    static ref DECODE: HashMap<&'static str, char> = MORSE_CODES.iter().copied().collect();
    static ref ENCODE: HashMap<char, &'static str> =
        MORSE_CODES.iter().map(|&(code, c)| (c, code)).collect();
}

/// Read-only view of the process-wide table
#[derive(Debug, Default, Clone, Copy)]
pub struct MorseTable;

impl MorseTable {
    pub fn new() -> Self {
        Self
    }

    /// Character for a dot/dash sequence, None if the sequence is not a code
    pub fn lookup(&self, sequence: &str) -> Option<char> {
        DECODE.get(sequence).copied()
    }

    /// Code for a character (case-insensitive), None outside A-Z / 0-9
    pub fn encode(&self, c: char) -> Option<&'static str> {
        ENCODE.get(&c.to_ascii_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        DECODE.len()
    }

    pub fn is_empty(&self) -> bool {
        DECODE.is_empty()
    }

    /// All (code, character) pairs in alphabet order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, char)> {
        MORSE_CODES.iter().copied()
    }
}
