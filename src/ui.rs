//! Stateless console formatting helpers.

use console::style;

/// Framed section header.
pub fn print_header(text: &str) {
    let bar = "=".repeat(60);
    println!("\n{}", style(&bar).magenta().bold());
    println!("{}", style(text).magenta().bold());
    println!("{}\n", style(&bar).magenta().bold());
}

pub fn print_success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}

pub fn print_info(text: &str) {
    println!("{} {}", style("i").cyan().bold(), text);
}

pub fn print_warning(text: &str) {
    println!("{} {}", style("!").yellow().bold(), style(text).yellow());
}

pub fn print_error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(text).red());
}

/// Bolds an inline label, e.g. "Project name:".
pub fn label(text: &str) -> String {
    style(text).bold().to_string()
}
