//! Autocomplete handler: ranked sticker choices for partially typed text.

use crate::engine::SearchEngine;
use crate::format::format_choices;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AutocompleteRequest {
    /// Sticker text typed so far
    pub text: Option<String>,
}

/// Resolve the typed text to a JSON array of `{name, value}` choices.
///
/// A request without text yields no choices.
pub fn handle_autocomplete(
    engine: &SearchEngine,
    limit: usize,
    request: AutocompleteRequest,
) -> Result<String, String> {
    let Some(query) = request.text else {
        return Ok("[]".to_string());
    };

    let results = engine.resolve(&query, limit);
    format_choices(&results).map_err(|e| {
        tracing::error!("Failed to render choices for '{}': {}", query, e);
        format!("Failed to render choices: {}", e)
    })
}
