//! Resolvers for intermediate embed hosts.
//!
//! Some provider catalog pages do not link streams directly; they link embed
//! players on third-party hosts. A resolver turns one embed URL into a
//! playable manifest URL.

pub mod voe;

pub use voe::VoeResolver;
