use std::path::Path;

use anyhow::{Context, Result};

use fg_forge::analyze::{
    collect_matches, plan_highlights, resolve_ring_overlaps, VariantSet,
};
use fg_forge::chem::{ChemistryEngine, InputFormat};
use fg_forge::toolkit::Toolkit;

use crate::cli::{AnalyzeArgs, MoleculeFormat};
use crate::commands::catalog::load_compiled_catalog;
use crate::display::{print_group_details, print_highlight_plan};

pub fn run_analyze(catalog_path: &Path, args: AnalyzeArgs) -> Result<()> {
    let catalog = load_compiled_catalog(catalog_path)?;

    let format = match args.format {
        Some(MoleculeFormat::MolFile) => InputFormat::MolFile,
        Some(MoleculeFormat::Smiles) => InputFormat::Smiles,
        Some(MoleculeFormat::Smarts) => InputFormat::Smarts,
        None => InputFormat::detect(&args.input),
    };
    let molecule = Toolkit
        .parse_molecule(&args.input, format)
        .with_context(|| format!("cannot read '{}' as {}", args.input, format))?;

    let variants = VariantSet::build(&Toolkit, molecule);
    let records = collect_matches(&Toolkit, &catalog, &variants);
    let records = if args.no_ring_filter {
        records
    } else {
        resolve_ring_overlaps(records, variants.ring_info())
    };

    let mut names: Vec<String> = records.into_iter().map(|r| r.group).collect();
    names.sort();

    if names.is_empty() {
        println!("no functional groups found");
        return Ok(());
    }

    println!("found {} functional group(s):", names.len());
    for name in &names {
        if args.detailed {
            match catalog.definition(name) {
                Some(def) => print_group_details(def),
                None => println!("{name}"),
            }
        } else {
            println!("  {name}");
        }
    }

    if args.highlights {
        let plan = plan_highlights(&Toolkit, &catalog, &variants, &names);
        print_highlight_plan(&plan);
    }

    Ok(())
}
