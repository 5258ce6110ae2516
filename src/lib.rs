//! color-rules: quality threshold rules to report snippets
//!
//! Reads a color rules YAML file in either supported dialect, normalizes it
//! into one canonical model, checks threshold ordering, and renders
//! copy/paste-ready HTML snippets for the report template.

pub mod cli;
pub mod core;
pub mod render;
pub mod yaml;
