//! Core data structures flowing through the matching pipeline.
//!
//! - [`definition`] – Functional group definitions with their pattern text
//!   and metadata.
//! - [`matches`] – Match records tied to the molecule variant that produced
//!   them, plus ring classification.
//! - [`rings`] – Ring membership data reported by the chemistry engine.
//! - [`highlight`] – Colors and per-request highlight plans for rendering.
//!
//! The data model deliberately separates what the catalog owns
//! ([`GroupDefinition`]) from request-scoped state ([`MatchRecord`],
//! [`HighlightPlan`]): the former is built once and shared read-only, the
//! latter is owned by a single analysis request.

pub mod definition;
pub mod highlight;
pub mod matches;
pub mod rings;

pub use definition::GroupDefinition;
pub use highlight::{Color, HighlightPlan};
pub use matches::{MatchRecord, RingClassifiedMatch, Variant, CLASSIFIED_RING_SIZES};
pub use rings::RingInfo;
