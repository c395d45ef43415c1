//! The functional group identification pipeline.
//!
//! Analysis runs in fixed stages: derive the molecule's structural
//! variants, probe every catalog pattern against them, resolve
//! ring-overlap subsumption, and (on request) plan highlights on the
//! display molecule. Each stage degrades gracefully when a collaborator
//! call fails; only an unparseable input molecule or an unusable catalog
//! abort a request.

mod catalog;
mod collect;
mod error;
mod highlight;
mod mapping;
mod resolve;
mod variants;

pub use catalog::{Catalog, CompileFailure};
pub use collect::collect_matches;
pub use error::Error;
pub use highlight::{color_sequence, plan_highlights};
pub use mapping::build_atom_mapping;
pub use resolve::resolve_ring_overlaps;
pub use variants::VariantSet;

use crate::chem::{InputFormat, Matcher, Renderer};
use crate::model::HighlightPlan;

/// Per-request analysis options.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzeConfig {
    /// Apply ring overlap resolution to the collected matches. Off, every
    /// raw match is reported even when contained in a larger one.
    pub filter_ring_overlaps: bool,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            filter_ring_overlaps: true,
        }
    }
}

/// Identify the functional groups present in `molecule`.
///
/// Returns the surviving group names in lexicographic order. Infallible:
/// parsing happened before this call, and every per-entry or per-variant
/// failure inside the pipeline is recovered and logged.
pub fn analyze<T>(
    matcher: &T,
    catalog: &Catalog<T::Pattern>,
    molecule: T::Mol,
    config: AnalyzeConfig,
) -> Vec<String>
where
    T: Matcher,
{
    run(matcher, catalog, molecule, config).0
}

/// Parse `input` (auto-detecting its notation) and analyze it.
pub fn analyze_input<T>(
    matcher: &T,
    catalog: &Catalog<T::Pattern>,
    input: &str,
    config: AnalyzeConfig,
) -> Result<Vec<String>, Error>
where
    T: Matcher,
{
    let format = InputFormat::detect(input);
    let molecule = matcher
        .parse_molecule(input, format)
        .map_err(|e| Error::Parse(e.to_string()))?;
    Ok(analyze(matcher, catalog, molecule, config))
}

/// Identify functional groups and plan highlights for every one found.
pub fn analyze_with_highlights<T>(
    matcher: &T,
    catalog: &Catalog<T::Pattern>,
    molecule: T::Mol,
    config: AnalyzeConfig,
) -> (Vec<String>, HighlightPlan)
where
    T: Matcher,
{
    let (names, variants) = run(matcher, catalog, molecule, config);
    let plan = plan_highlights(matcher, catalog, &variants, &names);
    (names, plan)
}

fn run<T>(
    matcher: &T,
    catalog: &Catalog<T::Pattern>,
    molecule: T::Mol,
    config: AnalyzeConfig,
) -> (Vec<String>, VariantSet<T::Mol>)
where
    T: Matcher,
{
    let variants = VariantSet::build(matcher, molecule);
    let records = collect_matches(matcher, catalog, &variants);

    let records = if config.filter_ring_overlaps {
        resolve_ring_overlaps(records, variants.ring_info())
    } else {
        records
    };

    let mut names: Vec<String> = records.into_iter().map(|r| r.group).collect();
    names.sort();
    (names, variants)
}

/// Render the display molecule with its highlight plan.
///
/// Returns `None` without calling the renderer when the plan is empty, and
/// logs-and-drops a renderer failure so a broken drawing backend never
/// fails an analysis.
pub fn render_highlights<R>(
    renderer: &R,
    display: &R::Mol,
    plan: &HighlightPlan,
    size: (u32, u32),
) -> Option<Vec<u8>>
where
    R: Renderer,
{
    if plan.is_empty() {
        return None;
    }
    match renderer.render(display, plan, size) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("highlight rendering failed: {}", e);
            None
        }
    }
}
