//! Static reference vocabularies consulted by the validators.
//!
//! These are compile-time snapshots of external registries: the BCP 47
//! primary language subtags, the IANA media-type registry, and the controlled
//! vocabularies of the Presentation API (behaviors, viewing directions).
//! Project-specific additions go through [`crate::BuilderConfig`] rather than
//! mutating these tables.

pub(crate) mod bcp47;
pub(crate) mod behavior;
pub(crate) mod media_types;
