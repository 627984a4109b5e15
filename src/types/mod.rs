pub mod identifiers;

pub use identifiers::{Cite2Urn, CtsUrn, MalformedUrnError};
