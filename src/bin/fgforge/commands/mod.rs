mod analyze;
mod catalog;

use std::path::Path;

use anyhow::Result;

use crate::cli::Command;

pub fn dispatch(catalog_path: &Path, command: Command) -> Result<()> {
    match command {
        Command::Analyze(args) => analyze::run_analyze(catalog_path, args),
        Command::List => catalog::run_list(catalog_path),
        Command::Search(args) => catalog::run_search(catalog_path, &args.term),
        Command::Category(args) => catalog::run_category(catalog_path, &args.category),
        Command::Reactivity(args) => catalog::run_reactivity(catalog_path, &args.level),
        Command::Categories => catalog::run_categories(catalog_path),
        Command::Info(args) => catalog::run_info(catalog_path, &args.name),
        Command::Add(args) => catalog::run_add(catalog_path, args),
        Command::Remove(args) => catalog::run_remove(catalog_path, &args.name),
    }
}
