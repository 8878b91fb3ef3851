//! Input samples and landmark geometry

use serde::{Deserialize, Serialize};

/// Normalized 2D landmark position (UV, 0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale UV coordinates to pixel space
    pub fn denormalize(&self, width: f64, height: f64) -> Self {
        Self {
            x: self.x * width,
            y: self.y * height,
        }
    }

    pub fn distance(&self, other: &Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f64; 2]> for Point2 {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

/// Six eye landmarks in canonical order:
/// p1 outer corner, p2/p3 upper lid, p4 inner corner, p5/p6 lower lid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeLandmarks(pub [Point2; 6]);

impl EyeLandmarks {
    pub fn new(points: [Point2; 6]) -> Self {
        Self(points)
    }

    /// Pick the six eye points out of a full face mesh.
    /// Returns None if any index is out of range.
    pub fn from_mesh(mesh: &[Point2], indices: &[usize; 6]) -> Option<Self> {
        let mut points = [Point2::default(); 6];
        for (slot, &idx) in points.iter_mut().zip(indices.iter()) {
            *slot = *mesh.get(idx)?;
        }
        Some(Self(points))
    }

    pub fn points(&self) -> &[Point2; 6] {
        &self.0
    }
}

impl From<[[f64; 2]; 6]> for EyeLandmarks {
    fn from(raw: [[f64; 2]; 6]) -> Self {
        Self(raw.map(Point2::from))
    }
}

/// One openness measurement fed to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpennessSample {
    /// Monotonic stream time in seconds
    #[serde(rename = "t")]
    pub timestamp: f64,
    /// Averaged EAR
    #[serde(rename = "ear")]
    pub value: f64,
}

impl OpennessSample {
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// One frame of the input stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameInput {
    /// A face was found and an openness value measured
    Sample(OpennessSample),
    /// No face detected at this time step
    NoFace { timestamp: f64 },
}
