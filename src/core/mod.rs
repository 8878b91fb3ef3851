//! Core modules for Blinkmorse

pub mod morse;
pub mod openness;
pub mod decoder;
pub mod stream;
pub mod synth;
pub mod persist;

pub use morse::MorseTable;
pub use openness::{compute_openness, eye_aspect_ratio, measure, EarReading};
pub use decoder::{MorseDecoder, DecoderStats};
pub use stream::{decode_stream, FrameReader, StreamEnd, parse_line, format_sample};
pub use synth::{synthesize, SynthConfig};
pub use persist::{save_message, load_message};
