use serde::{Deserialize, Serialize};

use crate::roi::{extract_roi, strip_roi, InvalidRoiError, Roi};

/// One raw DSE fact: a passage documented by an image on a surface.
///
/// Duplicate records are meaningful — multiple images can document the
/// same passage/surface pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DseRecord {
    /// CTS citation of the text passage.
    pub passage: String,
    /// CITE2 identifier of the image, optionally carrying an `@x,y,w,h`
    /// region-of-interest suffix.
    pub image: String,
    /// CITE2 identifier of the physical surface.
    pub surface: String,
}

/// A DSE record with its derived image decomposition, computed once at
/// index construction.
///
/// `roi` and `rect` are both present or both absent: a present suffix
/// that fails four-numeric-token validation aborts construction of the
/// whole index instead of producing a partial row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DseRow {
    pub passage: String,
    pub image: String,
    pub surface: String,
    /// The image identifier with any ROI suffix removed.
    pub wholeimage: String,
    /// Raw `"x,y,w,h"` suffix text, when present.
    pub roi: Option<String>,
    /// Parsed rectangle, when present.
    pub rect: Option<Roi>,
}

impl DseRow {
    /// Derive the image decomposition for one record.
    pub fn derive(record: DseRecord) -> Result<Self, InvalidRoiError> {
        let wholeimage = strip_roi(&record.image).to_string();
        // An `@` with an empty suffix is a present-but-invalid ROI, not a
        // missing one, so branch on the separator rather than on the
        // extracted text.
        let (roi, rect) = match record.image.rfind('@') {
            None => (None, None),
            Some(_) => {
                let suffix = extract_roi(&record.image);
                (Some(suffix.to_string()), Some(Roi::parse(suffix)?))
            }
        };

        Ok(DseRow {
            passage: record.passage,
            image: record.image,
            surface: record.surface,
            wholeimage,
            roi,
            rect,
        })
    }
}
