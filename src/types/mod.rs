//! Core types for Blinkmorse

mod state;
mod symbol;
mod event;
mod output;
mod sample;
mod config;
mod error;

pub use state::EyeState;
pub use symbol::{Symbol, PendingSequence};
pub use event::DecoderEvent;
pub use output::DecoderOutput;
pub use sample::{Point2, EyeLandmarks, OpennessSample, FrameInput};
pub use config::{DecoderConfig, FlushPolicy};
pub use error::{ErrorReason, BlinkError};
