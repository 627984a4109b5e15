use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid ROI in image value: ROI must have four comma-separated numeric values (x,y,w,h)")]
pub struct InvalidRoiError;

/// Rectangular region of interest on an image, in the image's own
/// coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Roi {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Roi {
    /// Validate and parse an ROI string.
    ///
    /// This is the single source of the "four comma-separated numeric
    /// values" contract: exactly 4 tokens, each a finite number.
    pub fn parse(roi: &str) -> Result<Self, InvalidRoiError> {
        let tokens: Vec<&str> = roi.split(',').collect();
        let [x, y, w, h] = tokens[..] else {
            return Err(InvalidRoiError);
        };
        Ok(Roi {
            x: parse_finite(x)?,
            y: parse_finite(y)?,
            w: parse_finite(w)?,
            h: parse_finite(h)?,
        })
    }

    /// True iff `(px, py)` lies inside this rectangle, bounds inclusive
    /// on all four edges.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

fn parse_finite(token: &str) -> Result<f64, InvalidRoiError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(InvalidRoiError),
    }
}

/// The ROI portion of an image identifier: the substring after the last
/// `@`, or the empty string when no `@` is present.
///
/// Permissive by design — no arity or numeric validation, so callers can
/// inspect malformed suffixes verbatim. Use [`Roi::parse`] to validate.
pub fn extract_roi(image_id: &str) -> &str {
    match image_id.rfind('@') {
        Some(at) => &image_id[at + 1..],
        None => "",
    }
}

/// The image identifier with any ROI suffix removed; identity when no
/// `@` is present.
pub fn strip_roi(image_id: &str) -> &str {
    match image_id.rfind('@') {
        Some(at) => &image_id[..at],
        None => image_id,
    }
}

/// Null-safe, inclusive point-in-rectangle test.
///
/// Any absent rectangle field yields `false`, never an error: a row
/// without a rectangle can never contain a point.
pub fn point_in_rect(
    px: f64,
    py: f64,
    x: Option<f64>,
    y: Option<f64>,
    w: Option<f64>,
    h: Option<f64>,
) -> bool {
    match (x, y, w, h) {
        (Some(x), Some(y), Some(w), Some(h)) => Roi { x, y, w, h }.contains(px, py),
        _ => false,
    }
}
