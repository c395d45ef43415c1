//! Identification of functional groups in molecules by substructure
//! matching against a curated catalog, with ring-aware overlap resolution
//! and deterministic highlight planning for rendering.
//!
//! # Features
//!
//! - **Catalog** — Named group definitions with pattern text and
//!   metadata, compiled once and shared read-only across requests
//! - **Variant matching** — Every pattern is probed against the molecule
//!   as given, with explicit hydrogens added, and with them removed,
//!   in a fixed fallback order
//! - **Ring overlap resolution** — Matches whose ring atoms are contained
//!   in a larger match on the same ring are dropped, so the most specific
//!   pattern wins
//! - **Highlight planning** — Stable per-group colors mapped onto a
//!   canonical display molecule, first-writer-wins on shared atoms
//!
//! # Quick Start
//!
//! Chemistry is pluggable through the [`chem`] traits; the built-in
//! [`toolkit`] engine covers SMILES input and SMILES-expressible patterns:
//!
//! ```
//! use fg_forge::analyze::{analyze_input, AnalyzeConfig, Catalog};
//! use fg_forge::model::GroupDefinition;
//! use fg_forge::toolkit::Toolkit;
//!
//! let definitions = vec![
//!     GroupDefinition::new("hydroxyl", "CO"),
//!     GroupDefinition::new("carboxylic_acid", "C(=O)O"),
//!     GroupDefinition::new("benzene_ring", "c1ccccc1"),
//! ];
//! let catalog = Catalog::load(&Toolkit, definitions)?;
//!
//! // Aspirin's ester oxygen, carboxylic acid, and aromatic ring.
//! let found = analyze_input(
//!     &Toolkit,
//!     &catalog,
//!     "CC(=O)Oc1ccccc1C(=O)O",
//!     AnalyzeConfig::default(),
//! )?;
//! assert!(found.contains(&"carboxylic_acid".to_string()));
//! assert!(found.contains(&"benzene_ring".to_string()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`model`] — Definitions, match records, ring info, highlight plans
//! - [`chem`] — Traits a chemistry engine implements to plug in
//! - [`analyze`] — The matching pipeline: catalog, variants, collection,
//!   resolution, mapping, highlighting
//! - [`toolkit`] — The built-in graph-based engine
//! - [`io`] — Catalog JSON files and their editing operations

pub mod analyze;
pub mod chem;
pub mod io;
pub mod model;
pub mod toolkit;

pub use analyze::{analyze, analyze_input, analyze_with_highlights, AnalyzeConfig, Catalog};
pub use chem::{ChemError, ChemistryEngine, InputFormat, Matcher, PatternCompiler, Renderer};
pub use model::{Color, GroupDefinition, HighlightPlan, MatchRecord, RingInfo, Variant};
