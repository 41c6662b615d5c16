//! Terminal styling utilities for the CLI front end

use std::path::Path;
use std::time::Duration;

use console::{style, Emoji};

pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static SIREN: Emoji<'_, '_> = Emoji("🚨 ", ">> ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ███████╗██████╗  █████╗ ██╗   ██╗██████╗ ███████╗██╗███████╗████████╗
    ██╔════╝██╔══██╗██╔══██╗██║   ██║██╔══██╗██╔════╝██║██╔════╝╚══██╔══╝
    █████╗  ██████╔╝███████║██║   ██║██║  ██║███████╗██║█████╗     ██║
    ██╔══╝  ██╔══██╗██╔══██║██║   ██║██║  ██║╚════██║██║██╔══╝     ██║
    ██║     ██║  ██║██║  ██║╚██████╔╝██████╔╝███████║██║██║        ██║
    ╚═╝     ╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝ ╚═════╝ ╚══════╝╚═╝╚═╝        ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("σ").magenta().bold(),
        style("Sift transaction batches for statistical outliers").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(input: &Path, result_dir: &Path, trees: usize, contamination: f64, seed: u64) {
    println!(
        "    {} Input:         {}",
        FOLDER,
        style(input.display()).yellow()
    );
    println!(
        "    {} Results:       {}",
        SAVE,
        style(result_dir.display()).yellow()
    );
    println!(
        "    {} Trees:         {}",
        CHART,
        style(trees).yellow()
    );
    println!(
        "    {} Contamination: {}",
        CHART,
        style(format!("{:.1}%", contamination * 100.0)).yellow()
    );
    println!("    {} Seed:          {}", CHART, style(seed).yellow());
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize) {
    println!(
        "      Found {} {}",
        style(count).yellow().bold(),
        description
    );
}

/// Print the elapsed time for a step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "      {}",
        style(format!("took {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        SIREN,
        style("Fraudsift run complete!").green().bold()
    );
    println!();
}
