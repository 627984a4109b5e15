//! Hierarchical containment between CTS citations, plus the shared
//! passage-collapsing rule used for text inventories.

use crate::types::identifiers::{CtsUrn, MalformedUrnError};

/// Decide whether citation `u1` is contained by citation `u2`: identical
/// to it, or a more specific reference within it.
///
/// Directional and not generally symmetric. Matching rules:
/// - identical strings match immediately, before any parsing;
/// - namespaces must be equal;
/// - textgroup and work must be equal; the optional version/exemplar
///   qualifier must be equal or absent on at least one side (absence is
///   a wildcard);
/// - passages must be equal, or `u2`'s passage is empty, or `u2`'s
///   passage is a strict dot-delimited ancestor prefix of `u1`'s
///   (`"1.1"` is contained by `"1"`; `"10.1"` is not).
pub fn ctsurn_contains(u1: &str, u2: &str) -> Result<bool, MalformedUrnError> {
    if u1 == u2 {
        return Ok(true);
    }

    let a = CtsUrn::parse(u1)?;
    let b = CtsUrn::parse(u2)?;

    let group_match = a.namespace == b.namespace;
    let work_match = a.text_group == b.text_group
        && a.work == b.work
        && version_compatible(a.version.as_deref(), b.version.as_deref());
    let passage_match = a.passage == b.passage
        || b.passage.is_empty()
        || is_passage_ancestor(&b.passage, &a.passage);

    Ok(group_match && work_match && passage_match)
}

fn version_compatible(v1: Option<&str>, v2: Option<&str>) -> bool {
    match (v1, v2) {
        (Some(v1), Some(v2)) => v1 == v2,
        _ => true,
    }
}

/// True iff `descendant` extends `ancestor` by at least one dot-delimited
/// component: `ancestor + "." + <one or more characters>`.
fn is_passage_ancestor(ancestor: &str, descendant: &str) -> bool {
    descendant.len() > ancestor.len() + 1
        && descendant.starts_with(ancestor)
        && descendant.as_bytes()[ancestor.len()] == b'.'
}

/// Collapse a CTS passage citation to its text-level form by dropping the
/// entire passage component, keeping the trailing colon:
/// `urn:cts:ns:group.work:1.1` becomes `urn:cts:ns:group.work:`.
///
/// This rule is shared with external passage-normalization tooling and
/// backs [`crate::dse::DseIndex::texts`]; identity on a URN that already
/// ends with a colon. Inputs without any colon are returned unchanged.
pub fn collapse_passage(urn: &str) -> String {
    match urn.rfind(':') {
        Some(colon) => urn[..=colon].to_string(),
        None => urn.to_string(),
    }
}
