pub mod geometry;

pub use geometry::{extract_roi, point_in_rect, strip_roi, InvalidRoiError, Roi};
