//! Eye-openness estimator: Eye Aspect Ratio from six landmarks per eye
//!
//! EAR = (|p2-p6| + |p3-p5|) / (2 * |p1-p4|), computed in pixel space.
//! Roughly 0.3 for an open eye, near 0 when closed.

use crate::types::{EyeLandmarks, Point2};
use crate::DEGENERATE_EAR;

/// Per-eye and averaged EAR for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarReading {
    pub left: f64,
    pub right: f64,
    pub average: f64,
}

/// EAR for a single eye. Points are UV and are scaled by the frame size
/// before measuring, since the two axes are not the same length in pixels.
pub fn eye_aspect_ratio(eye: &EyeLandmarks, width: f64, height: f64) -> f64 {
    let p: [Point2; 6] = eye.0.map(|pt| pt.denormalize(width, height));

    let vertical_1 = p[1].distance(&p[5]);
    let vertical_2 = p[2].distance(&p[4]);
    let horizontal = p[0].distance(&p[3]);

    if !horizontal.is_finite() || horizontal <= 0.0 {
        return DEGENERATE_EAR;
    }

    let ear = (vertical_1 + vertical_2) / (2.0 * horizontal);
    if ear.is_finite() {
        ear
    } else {
        DEGENERATE_EAR
    }
}

/// Measure both eyes
pub fn measure(left: &EyeLandmarks, right: &EyeLandmarks, width: f64, height: f64) -> EarReading {
    let left = eye_aspect_ratio(left, width, height);
    let right = eye_aspect_ratio(right, width, height);
    EarReading {
        left,
        right,
        average: (left + right) / 2.0,
    }
}

/// Averaged openness for one frame
pub fn compute_openness(left: &EyeLandmarks, right: &EyeLandmarks, width: f64, height: f64) -> f64 {
    measure(left, right, width, height).average
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Eye centred at (cx, cy) with the given UV width and lid opening
    fn eye(cx: f64, cy: f64, w: f64, open: f64) -> EyeLandmarks {
        EyeLandmarks::from([
            [cx - w / 2.0, cy],
            [cx - w / 6.0, cy - open / 2.0],
            [cx + w / 6.0, cy - open / 2.0],
            [cx + w / 2.0, cy],
            [cx + w / 6.0, cy + open / 2.0],
            [cx - w / 6.0, cy + open / 2.0],
        ])
    }

    /// Mirror across the vertical centre line, keeping canonical order
    /// (outer corner stays p1)
    fn mirror(e: &EyeLandmarks) -> EyeLandmarks {
        let m = |p: &Point2| Point2::new(1.0 - p.x, p.y);
        let p = e.points();
        EyeLandmarks::new([m(&p[0]), m(&p[1]), m(&p[2]), m(&p[3]), m(&p[4]), m(&p[5])])
    }

    #[test]
    fn test_known_ratio_square_frame() {
        // opening 0.03, width 0.1 -> (0.03 + 0.03) / (2 * 0.1) = 0.3
        let e = eye(0.3, 0.4, 0.1, 0.03);
        let ear = eye_aspect_ratio(&e, 1000.0, 1000.0);
        assert!((ear - 0.3).abs() < 1e-9, "got {}", ear);
    }

    #[test]
    fn test_frame_aspect_changes_ratio() {
        // Same UV points on a 2:1 frame stretch the horizontal axis
        let e = eye(0.3, 0.4, 0.1, 0.03);
        let ear = eye_aspect_ratio(&e, 2000.0, 1000.0);
        assert!((ear - 0.15).abs() < 1e-9, "got {}", ear);
    }

    #[test]
    fn test_closed_eye_near_zero() {
        let e = eye(0.3, 0.4, 0.1, 0.0);
        assert!(eye_aspect_ratio(&e, 640.0, 480.0) < 1e-12);
    }

    #[test]
    fn test_mirrored_eyes_have_equal_ear() {
        let left = eye(0.35, 0.4, 0.08, 0.025);
        let right = mirror(&left);
        let reading = measure(&left, &right, 640.0, 480.0);
        assert!((reading.left - reading.right).abs() < 1e-12);
        assert!((reading.average - reading.left).abs() < 1e-12);
    }

    #[test]
    fn test_average_of_both_eyes() {
        let left = eye(0.35, 0.4, 0.1, 0.03);
        let right = eye(0.65, 0.4, 0.1, 0.01);
        let avg = compute_openness(&left, &right, 1000.0, 1000.0);
        assert!((avg - 0.2).abs() < 1e-9, "got {}", avg);
    }

    #[test]
    fn test_degenerate_geometry_returns_sentinel() {
        let collapsed = EyeLandmarks::from([[0.5, 0.5]; 6]);
        assert_eq!(eye_aspect_ratio(&collapsed, 640.0, 480.0), DEGENERATE_EAR);

        let zero_frame = eye(0.3, 0.4, 0.1, 0.03);
        assert_eq!(eye_aspect_ratio(&zero_frame, 0.0, 0.0), DEGENERATE_EAR);

        let nan = EyeLandmarks::from([[f64::NAN, 0.5]; 6]);
        assert_eq!(eye_aspect_ratio(&nan, 640.0, 480.0), DEGENERATE_EAR);
    }
}
