//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    generate::GenerateArgs, normalize::NormalizeArgs, validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "color-rules")]
#[command(author, version, about = "Quality color rules snippet generator")]
#[command(long_about = "Turns a quality-threshold color rules YAML file into copy/paste-ready HTML snippets for the data quality report template.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a rules file for threshold ordering mistakes
    Validate(ValidateArgs),

    /// Render report snippets from a rules file
    Generate(GenerateArgs),

    /// Print the canonical form of a rules file
    Normalize(NormalizeArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML format (accepted back as a rules file)
    #[default]
    Yaml,
    /// JSON format (for programming)
    Json,
}
