use std::io::{self, Write};

use anyhow::Error;

use fg_forge::model::{Color, GroupDefinition, HighlightPlan};

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

/// Greedy word wrap; a word longer than `width` gets a line of its own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// One-line-per-name listing.
pub fn print_names(names: &[&str]) {
    for name in names {
        println!("{name}");
    }
}

pub fn print_group_details(def: &GroupDefinition) {
    println!("{}", def.name);
    println!("  id:          {}", def.id);
    println!("  pattern:     {}", def.smarts);
    if !def.description.is_empty() {
        println!("  description: {}", def.description);
    }
    println!("  path:        {}", def.path());
    println!("  reactivity:  {}", def.reactivity);
    if !def.common_reactions.is_empty() {
        println!("  reactions:   {}", def.common_reactions.join(", "));
    }
    if !def.examples.is_empty() {
        println!("  examples:    {}", def.examples.join(", "));
    }
    if let Some(chebi) = &def.chebi_id {
        println!("  chebi:       {}", chebi);
    }
}

pub fn print_highlight_plan(plan: &HighlightPlan) {
    if plan.is_empty() {
        println!("no highlights");
        return;
    }
    println!("highlighted atoms:");
    for atom in plan.atoms() {
        println!("  atom {:>3}  {}", atom, format_color(&plan.atom_colors[&atom]));
    }
    println!("highlighted bonds:");
    for bond in plan.bonds() {
        println!("  bond {:>3}  {}", bond, format_color(&plan.bond_colors[&bond]));
    }
}

fn format_color(color: &Color) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        (color.r * 255.0).round() as u8,
        (color.g * 255.0).round() as u8,
        (color.b * 255.0).round() as u8
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_splits_on_width() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_keeps_oversized_words_whole() {
        let lines = wrap("tiny extraordinarily-long-word", 10);
        assert_eq!(lines, vec!["tiny", "extraordinarily-long-word"]);
    }

    #[test]
    fn color_formats_as_hex() {
        assert_eq!(format_color(&Color::new(1.0, 0.0, 0.5)), "#ff0080");
    }
}
