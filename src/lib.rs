//! Deterministic in-memory index for DSE relations.
//!
//! `dse-core` indexes the documented-surfaces-and-exemplars (DSE) relation
//! linking a text passage (CTS URN), a region-addressable image (CITE2 URN),
//! and a physical surface (CITE2 URN). It answers bidirectional lookups among
//! the three, decomposes image identifiers into a base image plus an optional
//! region of interest, translates image URNs to and from IIIF Image API URLs,
//! and decides hierarchical containment between CTS citations. All operations
//! are deterministic, synchronous, and side-effect-free — identical inputs
//! always produce identical outputs, and nothing here touches the network or
//! the filesystem.

pub mod citation;
pub mod dse;
pub mod iiif;
pub mod roi;
pub mod table;
pub mod types;
