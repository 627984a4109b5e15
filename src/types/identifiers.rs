use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedUrnError {
    #[error("CTS URN must have exactly 5 colon-delimited fields: {0}")]
    CtsFieldCount(String),
    #[error("CTS work component must have 2 or 3 dot-delimited parts: {0}")]
    CtsWorkParts(String),
    #[error("CITE2 URN must have exactly 5 colon-delimited fields: {0}")]
    Cite2FieldCount(String),
    #[error("CITE2 collection component must have exactly one dot: {0}")]
    Cite2Collection(String),
    #[error("IIIF info URL must have exactly 5 path segments after the service base: {0}")]
    InfoUrlSegments(String),
}

/// Parsed view of a CTS text-citation URN:
/// `urn:cts:<namespace>:<textgroup>.<work>[.<version>]:<passage>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtsUrn {
    pub namespace: String,
    pub text_group: String,
    pub work: String,
    /// Version or exemplar qualifier; absence acts as a wildcard in
    /// containment checks, not as an empty string.
    pub version: Option<String>,
    /// Dot-delimited passage hierarchy, possibly empty.
    pub passage: String,
}

impl CtsUrn {
    /// Split a CTS URN into its logical fields.
    ///
    /// Requires exactly 5 top-level colon-delimited fields and a work
    /// component of 2 or 3 dot-delimited parts.
    pub fn parse(urn: &str) -> Result<Self, MalformedUrnError> {
        let fields: Vec<&str> = urn.split(':').collect();
        let [_, _, namespace, work_component, passage] = fields[..] else {
            return Err(MalformedUrnError::CtsFieldCount(urn.to_string()));
        };

        let work_parts: Vec<&str> = work_component.split('.').collect();
        let (text_group, work, version) = match work_parts[..] {
            [group, work] => (group, work, None),
            [group, work, version] => (group, work, Some(version.to_string())),
            _ => return Err(MalformedUrnError::CtsWorkParts(urn.to_string())),
        };

        Ok(CtsUrn {
            namespace: namespace.to_string(),
            text_group: text_group.to_string(),
            work: work.to_string(),
            version,
            passage: passage.to_string(),
        })
    }

    /// Passage hierarchy components, outermost first. Empty for a URN
    /// citing the work as a whole.
    pub fn passage_parts(&self) -> Vec<&str> {
        if self.passage.is_empty() {
            Vec::new()
        } else {
            self.passage.split('.').collect()
        }
    }
}

/// Parsed view of a CITE2 object URN:
/// `urn:cite2:<namespace>:<collection>.<version>:<object-id>`.
///
/// The object component is kept verbatim, including any `@roi` suffix;
/// region handling belongs to the [`crate::roi`] module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cite2Urn {
    pub namespace: String,
    pub collection: String,
    pub version: String,
    pub object: String,
}

impl Cite2Urn {
    /// Split a CITE2 URN into its logical fields.
    ///
    /// Requires exactly 5 top-level colon-delimited fields and a collection
    /// component with exactly one dot separating collection id and version.
    pub fn parse(urn: &str) -> Result<Self, MalformedUrnError> {
        let fields: Vec<&str> = urn.split(':').collect();
        let [_, _, namespace, collection_component, object] = fields[..] else {
            return Err(MalformedUrnError::Cite2FieldCount(urn.to_string()));
        };

        let Some((collection, version)) = split_once_exact(collection_component, '.') else {
            return Err(MalformedUrnError::Cite2Collection(urn.to_string()));
        };

        Ok(Cite2Urn {
            namespace: namespace.to_string(),
            collection: collection.to_string(),
            version: version.to_string(),
            object: object.to_string(),
        })
    }
}

/// Split on `sep` only when it occurs exactly once.
fn split_once_exact(s: &str, sep: char) -> Option<(&str, &str)> {
    let (left, right) = s.split_once(sep)?;
    if right.contains(sep) {
        return None;
    }
    Some((left, right))
}
