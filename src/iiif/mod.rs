//! Bidirectional mapping between CITE2 image URNs and IIIF Image API URLs.
//!
//! URL strings are only constructed and parsed here, never fetched.

use serde::{Deserialize, Serialize};

use crate::types::identifiers::{Cite2Urn, MalformedUrnError};

/// A IIIF image service hosting one or more CITE2 image collections.
///
/// Supplied by the caller; there are no implicit defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitableIIIFService {
    /// Prefix of every info/image URL for the service, including any
    /// trailing slash.
    pub urlbase: String,
    /// Image file extension, e.g. `jpg`.
    pub extension: String,
}

/// Form a IIIF `info.json` URL from a CITE2 image URN.
///
/// The URN must not carry an ROI suffix; callers strip it first, or use
/// [`urn_to_image_url`], which strips a well-formed suffix internally.
pub fn urn_to_info_url(
    urn: &str,
    service: &CitableIIIFService,
) -> Result<String, MalformedUrnError> {
    let parsed = Cite2Urn::parse(urn)?;
    Ok(format!(
        "{}{}/{}/{}/{}.{}/info.json",
        service.urlbase,
        parsed.namespace,
        parsed.collection,
        parsed.version,
        parsed.object,
        service.extension,
    ))
}

/// Form a IIIF image request URL from a CITE2 image URN.
///
/// A trailing `@` suffix of exactly 4 non-empty comma-separated tokens
/// becomes the IIIF region segment and is stripped from the object id.
/// Any other suffix is left verbatim in the object id and the region
/// defaults to `full` — deliberate leniency, not an error.
pub fn urn_to_image_url(
    urn: &str,
    service: &CitableIIIFService,
) -> Result<String, MalformedUrnError> {
    let mut base_urn = urn;
    let mut region = "full";

    if let Some((base, candidate)) = urn.rsplit_once('@') {
        let tokens: Vec<&str> = candidate.split(',').collect();
        if tokens.len() == 4 && tokens.iter().all(|t| !t.is_empty()) {
            base_urn = base;
            region = candidate;
        }
    }

    let info_url = urn_to_info_url(base_urn, service)?;
    Ok(info_url.replace(
        "/info.json",
        &format!("/{}/full/0/default.{}", region, service.extension),
    ))
}

/// Recover a CITE2 image URN from a IIIF `info.json` URL.
///
/// Inverse of [`urn_to_info_url`]: for any well-formed URN `u`,
/// `info_url_to_urn(urn_to_info_url(u)?)? == strip_roi(u)`.
pub fn info_url_to_urn(
    url: &str,
    service: &CitableIIIFService,
) -> Result<String, MalformedUrnError> {
    let stripped = url.replacen(&service.urlbase, "", 1);
    let segments: Vec<&str> = stripped.split('/').collect();
    let [namespace, collection, version, image_id, _trailing] = segments[..] else {
        return Err(MalformedUrnError::InfoUrlSegments(url.to_string()));
    };

    let suffix = format!(".{}", service.extension);
    let object = image_id.strip_suffix(&suffix).unwrap_or(image_id);
    Ok(format!(
        "urn:cite2:{}:{}.{}:{}",
        namespace, collection, version, object
    ))
}
