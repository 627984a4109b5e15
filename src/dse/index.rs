// The index is intentionally thin after construction:
// no mutation, no refresh methods, pure reads only.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::citation::collapse_passage;
use crate::roi::{strip_roi, InvalidRoiError};
use crate::table::{FieldType, Table};

use super::row::{DseRecord, DseRow};

const REQUIRED_COLUMNS: [&str; 3] = ["passage", "image", "surface"];

#[derive(Debug, Error)]
pub enum DseError {
    /// Input table missing or mistyping a required column. Fatal:
    /// construction aborts and no index is produced.
    #[error("Schema error: {0}")]
    Schema(String),
    /// A row's ROI suffix failed arity/numeric validation. Fatal for the
    /// whole table; partial indexes are never produced.
    #[error(transparent)]
    InvalidRoi(#[from] InvalidRoiError),
}

/// Fetch a cell from a required column; a null value violates the
/// non-null invariant of the DSE schema.
fn required_cell(table: &Table, name: &str, idx: usize) -> Result<String, DseError> {
    table
        .column_by_name(name)
        .and_then(|c| c.get_string(idx))
        .map(str::to_string)
        .ok_or_else(|| DseError::Schema(format!("null value in column {name} at row {idx}")))
}

/// Result policy for one query: whether projected image/passage values
/// are normalized (ROI stripped, or passage collapsed) and whether the
/// result set is de-duplicated.
///
/// Every public query routes through `DseIndex::select` with one of
/// these, so the exact-vs-normalized and unique-vs-repeating contracts
/// stay auditable in a single table of flags.
#[derive(Debug, Clone, Copy)]
struct QueryPolicy {
    normalize: bool,
    dedupe: bool,
}

#[derive(Debug, Clone, Copy)]
enum Project {
    Passage,
    Image,
    Surface,
}

#[derive(Debug, Clone, Copy)]
enum Filter<'a> {
    All,
    Passage(&'a str),
    Surface(&'a str),
    /// Image match after stripping the ROI from both sides.
    Wholeimage(&'a str),
    /// Exact image match, ROI included.
    Image(&'a str),
}

/// Validated, immutable index over a DSE relation table.
///
/// Construction validates the three-column schema and derives the image
/// decomposition for every row; each query is a pure read over the
/// derived rows. Queries never fail on "no matching rows" — they return
/// an empty vector.
#[derive(Debug, Clone)]
pub struct DseIndex {
    rows: Vec<DseRow>,
}

impl DseIndex {
    /// Build an index from typed records.
    ///
    /// The three-column schema is satisfied by construction; only ROI
    /// validation can fail.
    pub fn from_records(
        records: impl IntoIterator<Item = DseRecord>,
    ) -> Result<Self, DseError> {
        let rows = records
            .into_iter()
            .map(DseRow::derive)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DseIndex { rows })
    }

    /// Build an index from a tabular collection.
    ///
    /// The table must carry string-typed, non-null `passage`, `image`,
    /// and `surface` columns; the schema is enforced here rather than
    /// trusted from the source.
    pub fn from_table(table: &Table) -> Result<Self, DseError> {
        for name in REQUIRED_COLUMNS {
            let column = table
                .column_by_name(name)
                .ok_or_else(|| DseError::Schema(format!("required column missing: {name}")))?;
            if column.field_type() != FieldType::String {
                return Err(DseError::Schema(format!(
                    "column {name} must be string-typed, got {:?}",
                    column.field_type()
                )));
            }
        }

        let mut records = Vec::with_capacity(table.num_rows);
        for idx in table.row_indices() {
            records.push(DseRecord {
                passage: required_cell(table, "passage", idx)?,
                image: required_cell(table, "image", idx)?,
                surface: required_cell(table, "surface", idx)?,
            });
        }

        Self::from_records(records)
    }

    /// Derived rows in original order.
    pub fn rows(&self) -> &[DseRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every non-null raw ROI string, in original row order, duplicates
    /// retained.
    pub fn rois(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| row.roi.as_deref())
            .collect()
    }

    // Inventory queries.

    /// Unique surface references.
    pub fn surfaces(&self) -> Vec<String> {
        self.select(
            Filter::All,
            Project::Surface,
            QueryPolicy {
                normalize: false,
                dedupe: true,
            },
        )
    }

    /// Unique image references, ROI values dropped.
    pub fn images(&self) -> Vec<String> {
        self.select(
            Filter::All,
            Project::Image,
            QueryPolicy {
                normalize: true,
                dedupe: true,
            },
        )
    }

    /// Unique text references: each passage collapsed to its text-level
    /// citation via [`collapse_passage`].
    pub fn texts(&self) -> Vec<String> {
        self.select(
            Filter::All,
            Project::Passage,
            QueryPolicy {
                normalize: true,
                dedupe: true,
            },
        )
    }

    // Relation queries.

    /// Unique surfaces documented by an image; the query image may carry
    /// an ROI, which is ignored for matching.
    pub fn surfaces_for_image(&self, image: &str) -> Vec<String> {
        self.select(
            Filter::Wholeimage(strip_roi(image)),
            Project::Surface,
            QueryPolicy {
                normalize: false,
                dedupe: true,
            },
        )
    }

    /// Surfaces for a passage, one per matching row (not de-duplicated).
    pub fn surfaces_for_passage(&self, passage: &str) -> Vec<String> {
        self.select(
            Filter::Passage(passage),
            Project::Surface,
            QueryPolicy {
                normalize: false,
                dedupe: false,
            },
        )
    }

    /// Raw image references for a passage, ROI intact, one per matching
    /// row (not de-duplicated).
    pub fn images_for_passage(&self, passage: &str) -> Vec<String> {
        self.select(
            Filter::Passage(passage),
            Project::Image,
            QueryPolicy {
                normalize: false,
                dedupe: false,
            },
        )
    }

    /// Unique raw image references for a surface, ROI intact.
    ///
    /// De-duplication happens on the raw value: two rows sharing a
    /// wholeimage under distinct ROIs stay distinct here. Use
    /// [`DseIndex::wholeimages_for_surface`] for the normalized view.
    pub fn images_for_surface(&self, surface: &str) -> Vec<String> {
        self.select(
            Filter::Surface(surface),
            Project::Image,
            QueryPolicy {
                normalize: false,
                dedupe: true,
            },
        )
    }

    /// Unique whole-image references for a surface, ROI dropped.
    pub fn wholeimages_for_surface(&self, surface: &str) -> Vec<String> {
        self.select(
            Filter::Surface(surface),
            Project::Image,
            QueryPolicy {
                normalize: true,
                dedupe: true,
            },
        )
    }

    /// Unique whole-image references for a passage, ROI dropped.
    pub fn wholeimages_for_passage(&self, passage: &str) -> Vec<String> {
        self.select(
            Filter::Passage(passage),
            Project::Image,
            QueryPolicy {
                normalize: true,
                dedupe: true,
            },
        )
    }

    /// Unique passage references for a surface.
    pub fn passages_for_surface(&self, surface: &str) -> Vec<String> {
        self.select(
            Filter::Surface(surface),
            Project::Passage,
            QueryPolicy {
                normalize: false,
                dedupe: true,
            },
        )
    }

    /// Passages for an image, matched on the exact image string, ROI
    /// included: a bare whole-image id matches only rows without an ROI
    /// suffix, and an ROI-bearing id matches only rows with exactly that
    /// ROI. Normalize with [`strip_roi`] or use
    /// [`DseIndex::wholeimages_for_passage`] for ROI-insensitive lookup.
    pub fn passages_for_image(&self, image: &str) -> Vec<String> {
        self.select(
            Filter::Image(image),
            Project::Passage,
            QueryPolicy {
                normalize: false,
                dedupe: false,
            },
        )
    }

    /// The single selection path behind every query: filter rows, project
    /// one column, then apply the policy. De-duplicated results come back
    /// sorted (insertion order is irrelevant for unique sets); repeating
    /// results preserve row order.
    fn select(&self, filter: Filter<'_>, project: Project, policy: QueryPolicy) -> Vec<String> {
        let projected = self
            .rows
            .iter()
            .filter(|row| match filter {
                Filter::All => true,
                Filter::Passage(p) => row.passage == p,
                Filter::Surface(s) => row.surface == s,
                Filter::Wholeimage(w) => row.wholeimage == w,
                Filter::Image(i) => row.image == i,
            })
            .map(|row| match (project, policy.normalize) {
                (Project::Passage, false) => row.passage.clone(),
                (Project::Passage, true) => collapse_passage(&row.passage),
                (Project::Image, false) => row.image.clone(),
                (Project::Image, true) => row.wholeimage.clone(),
                (Project::Surface, _) => row.surface.clone(),
            });

        if policy.dedupe {
            let unique: BTreeSet<String> = projected.collect();
            unique.into_iter().collect()
        } else {
            projected.collect()
        }
    }
}
