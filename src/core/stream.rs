//! Frame stream: recorded frames, one per line
//!
//! Accepted line formats:
//! - `{"t": 1.25, "ear": 0.31}`                       openness sample
//! - `{"t": 1.25, "width": 640, "height": 480,
//!    "left": [[x, y], ...6], "right": [[x, y], ...6]}` eye landmarks
//! - `{"t": 1.25, "width": 640, "height": 480, "mesh": [[x, y], ...]}`
//!                                                     full face mesh
//! - `{"t": 1.25}` or `{"t": 1.25, "face": null}`      no face
//! - `1.25 0.31` / `1.25,0.31`                         plain sample
//! - `1.25 -` / `1.25 none`                            plain no face
//!
//! Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use serde::Deserialize;
use crate::core::openness::compute_openness;
use crate::core::MorseDecoder;
use crate::types::{
    BlinkError, DecoderOutput, ErrorReason, EyeLandmarks, FrameInput, OpennessSample, Point2,
};
use crate::{LEFT_EYE, RIGHT_EYE};

lazy_static! {
    static ref RE_PLAIN: Regex = Regex::new(
        r"(?i)^\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:e[-+]?\d+)?)\s*(?:,\s*|\s+)([-+]?(?:\d+\.?\d*|\.\d+)(?:e[-+]?\d+)?|-|none)\s*$"
    ).unwrap();
}

/// JSON frame record
#[derive(Debug, Deserialize)]
struct FrameRecord {
    t: f64,
    #[serde(default)]
    ear: Option<f64>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    left: Option<[[f64; 2]; 6]>,
    #[serde(default)]
    right: Option<[[f64; 2]; 6]>,
    #[serde(default)]
    mesh: Option<Vec<[f64; 2]>>,
}

impl FrameRecord {
    fn into_frame(self) -> Result<FrameInput, String> {
        let t = self.t;
        if !t.is_finite() {
            return Err(format!("timestamp must be finite, got {}", t));
        }

        if let Some(ear) = self.ear {
            return Ok(FrameInput::Sample(OpennessSample::new(t, ear)));
        }

        let eyes = match (self.left, self.right, self.mesh) {
            (Some(left), Some(right), _) => Some((EyeLandmarks::from(left), EyeLandmarks::from(right))),
            (None, None, Some(mesh)) => {
                let mesh: Vec<Point2> = mesh.into_iter().map(Point2::from).collect();
                let left = EyeLandmarks::from_mesh(&mesh, &LEFT_EYE);
                let right = EyeLandmarks::from_mesh(&mesh, &RIGHT_EYE);
                match (left, right) {
                    (Some(l), Some(r)) => Some((l, r)),
                    _ => return Err(format!("mesh has {} points, too few for eye indices", mesh.len())),
                }
            }
            (None, None, None) => None,
            _ => return Err("both 'left' and 'right' eye landmarks are required".to_string()),
        };

        match eyes {
            Some((left, right)) => {
                let (width, height) = match (self.width, self.height) {
                    (Some(w), Some(h)) => (w, h),
                    _ => return Err("'width' and 'height' are required with landmarks".to_string()),
                };
                let value = compute_openness(&left, &right, width, height);
                Ok(FrameInput::Sample(OpennessSample::new(t, value)))
            }
            None => Ok(FrameInput::NoFace { timestamp: t }),
        }
    }
}

/// Parse one line. Ok(None) for blank lines and comments.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<FrameInput>, BlinkError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let parse_err = |detail: String| BlinkError::new(ErrorReason::E102_STREAM_PARSE, detail).at_line(line_no);

    if trimmed.starts_with('{') {
        let record: FrameRecord = serde_json::from_str(trimmed).map_err(|e| parse_err(e.to_string()))?;
        return record.into_frame().map(Some).map_err(parse_err);
    }

    let caps = RE_PLAIN
        .captures(trimmed)
        .ok_or_else(|| parse_err(format!("unrecognized frame record: {}", trimmed)))?;

    let t: f64 = caps[1]
        .parse()
        .ok()
        .filter(|t: &f64| t.is_finite())
        .ok_or_else(|| parse_err(format!("bad timestamp: {}", &caps[1])))?;
    let value = &caps[2];
    if value == "-" || value.eq_ignore_ascii_case("none") {
        return Ok(Some(FrameInput::NoFace { timestamp: t }));
    }
    let value: f64 = value
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| parse_err(format!("bad value: {}", value)))?;
    Ok(Some(FrameInput::Sample(OpennessSample::new(t, value))))
}

/// Render a sample in the JSON line format
pub fn format_sample(sample: &OpennessSample) -> String {
    format!("{{\"t\":{:.4},\"ear\":{:.4}}}", sample.timestamp, sample.value)
}

/// Iterator of frames over any buffered reader
pub struct FrameReader<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<FrameInput, BlinkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    return Some(Err(BlinkError::new(ErrorReason::E101_STREAM_READ, e.to_string())
                        .at_line(self.line_no + 1)))
                }
            }
            self.line_no += 1;
            match parse_line(&self.buf, self.line_no) {
                Ok(Some(frame)) => return Some(Ok(frame)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// How a stream run ended
#[derive(Debug)]
pub struct StreamEnd {
    /// Output of the final flush
    pub output: DecoderOutput,
    /// Read or parse failure that stopped the stream early
    pub error: Option<BlinkError>,
}

/// Feed every frame to the decoder, then flush it.
///
/// A bad line stops the stream there. Frames before it stay decoded and
/// the flush still runs, so the message survives a truncated or corrupt
/// recording.
pub fn decode_stream<R, F>(decoder: &mut MorseDecoder, reader: R, mut on_output: F) -> StreamEnd
where
    R: BufRead,
    F: FnMut(&DecoderOutput),
{
    let mut error = None;
    for frame in FrameReader::new(reader) {
        match frame {
            Ok(frame) => {
                if let Some(output) = decoder.process(frame) {
                    on_output(&output);
                }
            }
            Err(e) => {
                warn!("Stream stopped early: {}", e);
                error = Some(e);
                break;
            }
        }
    }

    StreamEnd {
        output: decoder.finish(),
        error,
    }
}
