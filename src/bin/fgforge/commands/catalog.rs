use std::path::Path;

use anyhow::{bail, Context, Result};

use fg_forge::analyze::Catalog;
use fg_forge::io::{read_catalog_file, write_catalog_file, CatalogFile};
use fg_forge::model::GroupDefinition;
use fg_forge::toolkit::{GraphMolecule, Toolkit};

use crate::cli::AddArgs;
use crate::display::{print_group_details, print_names};

/// Read the catalog file and compile its patterns against the built-in
/// engine.
pub fn load_compiled_catalog(path: &Path) -> Result<Catalog<GraphMolecule>> {
    let file = read_catalog_file(path)
        .with_context(|| format!("cannot read catalog '{}'", path.display()))?;
    let catalog = Catalog::load(&Toolkit, file.functional_groups)
        .with_context(|| format!("catalog '{}' is unusable", path.display()))?;
    Ok(catalog)
}

pub fn run_list(path: &Path) -> Result<()> {
    let catalog = load_compiled_catalog(path)?;
    print_names(&catalog.names());
    report_failures(&catalog);
    Ok(())
}

pub fn run_search(path: &Path, term: &str) -> Result<()> {
    let catalog = load_compiled_catalog(path)?;
    let hits = catalog.search(term);
    if hits.is_empty() {
        println!("no groups match '{term}'");
    } else {
        print_names(&hits);
    }
    Ok(())
}

pub fn run_category(path: &Path, category: &str) -> Result<()> {
    let catalog = load_compiled_catalog(path)?;
    let names = catalog.by_category(category);
    if names.is_empty() {
        println!("no groups in category '{category}'");
    } else {
        print_names(&names);
    }
    Ok(())
}

pub fn run_reactivity(path: &Path, level: &str) -> Result<()> {
    let catalog = load_compiled_catalog(path)?;
    let names = catalog.by_reactivity(level);
    if names.is_empty() {
        println!("no groups with reactivity '{level}'");
    } else {
        print_names(&names);
    }
    Ok(())
}

pub fn run_categories(path: &Path) -> Result<()> {
    let catalog = load_compiled_catalog(path)?;
    for category in catalog.categories() {
        println!("{category}");
    }
    Ok(())
}

/// Show a definition even when its pattern failed to compile, falling back
/// to the raw catalog file.
pub fn run_info(path: &Path, name: &str) -> Result<()> {
    let file = read_catalog_file(path)
        .with_context(|| format!("cannot read catalog '{}'", path.display()))?;
    match file.find(name) {
        Some(def) => print_group_details(def),
        None => bail!("no group named '{name}' in the catalog"),
    }
    Ok(())
}

pub fn run_add(path: &Path, args: AddArgs) -> Result<()> {
    // Refuse patterns the engine cannot compile; a broken entry would be
    // excluded from every later analysis anyway.
    fg_forge::chem::PatternCompiler::compile_pattern(&Toolkit, &args.smarts)
        .with_context(|| format!("pattern '{}' does not compile", args.smarts))?;

    let mut definition = GroupDefinition::new(args.name, args.smarts);
    definition.description = args.description;
    definition.categories = args.categories;
    definition.subcategories = args.subcategories;
    definition.reactivity = args.reactivity;
    definition.common_reactions = args.reactions;
    definition.examples = args.examples;

    let mut file = read_or_default(path)?;
    let id = file
        .add_group(definition)
        .context("cannot add group to the catalog")?;
    write_catalog_file(path, &file)
        .with_context(|| format!("cannot write catalog '{}'", path.display()))?;

    println!("added {id}");
    Ok(())
}

pub fn run_remove(path: &Path, name: &str) -> Result<()> {
    let mut file = read_catalog_file(path)
        .with_context(|| format!("cannot read catalog '{}'", path.display()))?;
    if !file.remove_group(name) {
        bail!("no group named '{name}' in the catalog");
    }
    write_catalog_file(path, &file)
        .with_context(|| format!("cannot write catalog '{}'", path.display()))?;

    println!("removed {name}");
    Ok(())
}

/// `add` may target a catalog file that does not exist yet.
fn read_or_default(path: &Path) -> Result<CatalogFile> {
    if path.exists() {
        read_catalog_file(path)
            .with_context(|| format!("cannot read catalog '{}'", path.display()))
    } else {
        Ok(CatalogFile::default())
    }
}

fn report_failures(catalog: &Catalog<GraphMolecule>) {
    for failure in catalog.failures() {
        eprintln!(
            "warning: '{}' excluded ({})",
            failure.name, failure.reason
        );
    }
}
