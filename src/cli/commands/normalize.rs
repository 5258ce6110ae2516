//! `color-rules normalize` command - Print the canonical rules
//!
//! The output uses the canonical (legacy) layout and can be fed back to
//! `validate` or `generate`, which makes it the migration path between
//! dialects.

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::{load_rules, omitted_card_notice};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct NormalizeArgs {
    /// Color rules YAML file
    #[arg(long, env = "COLOR_RULES_CONFIG")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

pub fn run(args: NormalizeArgs, global: &GlobalOpts) -> Result<()> {
    // Status lines would corrupt the document on stdout
    let silent = GlobalOpts {
        quiet: true,
        verbose: false,
    };
    let normalized = load_rules(&args.config, &silent)?;

    if global.verbose {
        eprintln!("Loaded config schema: {}", normalized.dialect);
        for key in &normalized.omitted_cards {
            eprintln!("{}", omitted_card_notice(key));
        }
    }

    let rendered = match args.format {
        OutputFormat::Yaml => serde_yml::to_string(&normalized.config).into_diagnostic()?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&normalized.config).into_diagnostic()?;
            json.push('\n');
            json
        }
    };

    print!("{}", rendered);
    Ok(())
}
