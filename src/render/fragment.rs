//! Assembly of rendered blocks into output documents

use crate::core::rules::CanonicalConfig;
use crate::render::template::{render_dimension_block, render_error_card};

/// Output file for the dimension scores section
pub const DIMENSION_SCORES_FILE: &str = "dimension-scores-section.snippet.html";

/// Output file for the error distribution section
pub const ERROR_DISTRIBUTION_FILE: &str = "error-distribution-section.snippet.html";

/// Host fragment name of the dimension scores region
pub const DIMENSION_SCORES_FRAGMENT: &str = "dimensionScores";

/// Host fragment name of the error cards region
pub const ERROR_CARDS_FRAGMENT: &str = "errorDistributionCards";

/// Every block and card rendered from one configuration, in model order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSnippets {
    pub dimension_blocks: Vec<String>,
    pub error_cards: Vec<String>,
}

impl RenderedSnippets {
    pub fn render(config: &CanonicalConfig) -> Self {
        let scores = &config.dimension_scores;
        let errors = &config.error_distribution;
        let templates = &config.templates;

        let dimension_blocks = scores
            .dimensions
            .iter()
            .map(|d| render_dimension_block(&templates.dimension_score_html, d, &scores.thresholds))
            .collect();

        let error_cards = errors
            .dimensions
            .iter()
            .map(|c| {
                render_error_card(&templates.error_distribution_card_html, c, &errors.thresholds)
            })
            .collect();

        Self {
            dimension_blocks,
            error_cards,
        }
    }

    /// Contents of [`DIMENSION_SCORES_FILE`]
    pub fn dimension_scores_section(&self) -> String {
        section(&self.dimension_blocks)
    }

    /// Contents of [`ERROR_DISTRIBUTION_FILE`]
    pub fn error_distribution_section(&self) -> String {
        section(&self.error_cards)
    }

    /// A standalone HTML document exposing both sections as named host fragments
    pub fn fragments_document(&self) -> String {
        format!(
            "<!DOCTYPE html>\n\
             <html xmlns:th=\"http://www.thymeleaf.org\">\n\
             \x20 <body>\n\
             \x20   <th:block th:fragment=\"{DIMENSION_SCORES_FRAGMENT}\">\n\
             {dimensions}\n\
             \x20   </th:block>\n\
             \n\
             \x20   <th:block th:fragment=\"{ERROR_CARDS_FRAGMENT}\">\n\
             {cards}\n\
             \x20   </th:block>\n\
             \x20 </body>\n\
             </html>\n",
            dimensions = joined(&self.dimension_blocks),
            cards = joined(&self.error_cards),
        )
    }
}

fn joined(pieces: &[String]) -> String {
    pieces.join("\n\n").trim().to_string()
}

/// Pieces separated by a blank line, trimmed, with one trailing newline
pub fn section(pieces: &[String]) -> String {
    format!("{}\n", joined(pieces))
}
