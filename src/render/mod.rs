//! Rendering - token substitution and output assembly

pub mod fragment;
pub mod template;

pub use fragment::{
    RenderedSnippets, DIMENSION_SCORES_FILE, DIMENSION_SCORES_FRAGMENT, ERROR_CARDS_FRAGMENT,
    ERROR_DISTRIBUTION_FILE,
};
pub use template::{render_dimension_block, render_error_card, render_tokens, TemplateSet};
