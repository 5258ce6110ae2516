//! `color-rules validate` command - Check threshold ordering

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::load_rules;
use crate::cli::GlobalOpts;
use crate::core::validator::validate;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Color rules YAML file
    #[arg(long, env = "COLOR_RULES_CONFIG")]
    pub config: PathBuf,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let normalized = load_rules(&args.config, global)?;
    validate(&normalized.config)?;

    println!(
        "{} OK: config passes basic validation",
        style("✓").green()
    );
    Ok(())
}
