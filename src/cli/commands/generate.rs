//! `color-rules generate` command - Render report snippets

use console::style;
use miette::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::commands::load_rules;
use crate::cli::GlobalOpts;
use crate::core::validator::validate;
use crate::render::fragment::{RenderedSnippets, DIMENSION_SCORES_FILE, ERROR_DISTRIBUTION_FILE};

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Color rules YAML file
    #[arg(long, env = "COLOR_RULES_CONFIG")]
    pub config: PathBuf,

    /// Directory receiving the snippet files (created if missing)
    #[arg(long, env = "COLOR_RULES_OUT")]
    pub out: PathBuf,

    /// Also write a fragments document for the report template host
    /// (e.g. .../templates/reports/fragments/color-rules-generated.html)
    #[arg(long, env = "COLOR_RULES_FRAGMENTS")]
    pub write_fragments: Option<PathBuf>,
}

pub fn run(args: GenerateArgs, global: &GlobalOpts) -> Result<()> {
    let normalized = load_rules(&args.config, global)?;
    validate(&normalized.config)?;

    // Render everything before touching the filesystem
    let snippets = RenderedSnippets::render(&normalized.config);
    let outputs = [
        (
            args.out.join(DIMENSION_SCORES_FILE),
            snippets.dimension_scores_section(),
        ),
        (
            args.out.join(ERROR_DISTRIBUTION_FILE),
            snippets.error_distribution_section(),
        ),
    ];
    let fragments = args
        .write_fragments
        .as_ref()
        .map(|path| (path, snippets.fragments_document()));

    fs::create_dir_all(&args.out)
        .map_err(|e| miette::miette!("Failed to create {}: {}", args.out.display(), e))?;

    for (path, content) in &outputs {
        write_file(path, content)?;
        if global.verbose {
            println!("  wrote {}", style(path.display()).cyan());
        }
    }

    if let Some((path, document)) = fragments {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| miette::miette!("Failed to create {}: {}", parent.display(), e))?;
        }
        write_file(path, &document)?;
        if !global.quiet {
            println!(
                "{} Wrote fragments to: {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
    }

    if !global.quiet {
        println!(
            "{} Wrote snippets to: {}",
            style("✓").green(),
            style(args.out.display()).cyan()
        );
    }

    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))
}
