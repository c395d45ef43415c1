use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "fgforge",
    about = "Functional group identification and catalog management",
    version,
    author,
    propagate_version = true
)]
pub struct Cli {
    /// Catalog JSON file
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        default_value = "functional_groups.json"
    )]
    pub catalog: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Identify functional groups in a molecule (SMILES)
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// List every group in the catalog
    #[command(visible_alias = "ls")]
    List,

    /// Search groups by name, description, category, or reaction
    Search(SearchArgs),

    /// List groups in one category or subcategory
    Category(CategoryArgs),

    /// List groups with a given reactivity level
    Reactivity(ReactivityArgs),

    /// List every category and subcategory
    Categories,

    /// Show one group's full definition
    Info(InfoArgs),

    /// Add a group definition to the catalog file
    Add(AddArgs),

    /// Remove a group definition from the catalog file
    Remove(RemoveArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Molecule to analyze, as SMILES
    #[arg(value_name = "MOLECULE")]
    pub input: String,

    /// Input notation (auto-detected if omitted)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<MoleculeFormat>,

    /// Report every raw match, keeping matches contained in larger
    /// ring matches
    #[arg(long)]
    pub no_ring_filter: bool,

    /// Show each found group's metadata, not just its name
    #[arg(short, long)]
    pub detailed: bool,

    /// Show the highlight colors and atom indices for the found groups
    #[arg(long)]
    pub highlights: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MoleculeFormat {
    /// Path to a MOL/SDF structure file
    MolFile,
    /// SMILES line notation
    Smiles,
    /// Substructure pattern notation
    Smarts,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Case-insensitive search term
    #[arg(value_name = "TERM")]
    pub term: String,
}

#[derive(Args)]
pub struct CategoryArgs {
    #[arg(value_name = "CATEGORY")]
    pub category: String,
}

#[derive(Args)]
pub struct ReactivityArgs {
    /// Reactivity level (e.g. high, moderate, low)
    #[arg(value_name = "LEVEL")]
    pub level: String,
}

#[derive(Args)]
pub struct InfoArgs {
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Unique group name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Substructure pattern
    #[arg(long, value_name = "PATTERN")]
    pub smarts: String,

    #[arg(long, value_name = "TEXT", default_value = "")]
    pub description: String,

    /// Category, repeatable
    #[arg(long = "category", value_name = "NAME", action = clap::ArgAction::Append)]
    pub categories: Vec<String>,

    /// Subcategory, repeatable
    #[arg(long = "subcategory", value_name = "NAME", action = clap::ArgAction::Append)]
    pub subcategories: Vec<String>,

    /// Reactivity level
    #[arg(long, value_name = "LEVEL", default_value = "unknown")]
    pub reactivity: String,

    /// Common reaction, repeatable
    #[arg(long = "reaction", value_name = "NAME", action = clap::ArgAction::Append)]
    pub reactions: Vec<String>,

    /// Example molecule, repeatable
    #[arg(long = "example", value_name = "SMILES", action = clap::ArgAction::Append)]
    pub examples: Vec<String>,
}

#[derive(Args)]
pub struct RemoveArgs {
    #[arg(value_name = "NAME")]
    pub name: String,
}

pub fn parse() -> Cli {
    Cli::parse()
}
