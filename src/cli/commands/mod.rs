//! CLI command implementations

pub mod generate;
pub mod normalize;
pub mod validate;

use console::style;
use miette::Result;
use std::path::Path;

use crate::cli::GlobalOpts;
use crate::core::normalize::{normalize, Normalized};
use crate::yaml::load_rules_file;

/// Load a rules file and normalize it, reporting the detected dialect
pub(crate) fn load_rules(path: &Path, global: &GlobalOpts) -> Result<Normalized> {
    let raw = load_rules_file(path)?;
    let normalized = normalize(&raw)?;

    if !global.quiet {
        println!(
            "{} Loaded config schema: {}",
            style("→").blue(),
            normalized.dialect
        );
    }

    if global.verbose {
        let config = &normalized.config;
        println!(
            "  {} dimension(s), {} error card(s)",
            config.dimension_scores.dimensions.len(),
            config.error_distribution.dimensions.len()
        );
        for key in &normalized.omitted_cards {
            println!("{}", omitted_card_notice(key));
        }
    }

    Ok(normalized)
}

pub(crate) fn omitted_card_notice(key: &str) -> String {
    format!(
        "  {} no variable_count for {}, error card omitted",
        style("!").yellow(),
        style(key).cyan()
    )
}
