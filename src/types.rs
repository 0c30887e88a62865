//! Result types shared by the search core and the tool handlers.

/// A ranked search candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Catalog key, used for the final exact lookup
    pub key: String,
    /// Primary text shown to the user
    pub display_text: String,
    /// Match score in `[0, 1]`, lower is better and 0 is exact.
    /// `None` when the engine is configured not to surface scores.
    pub score: Option<f64>,
}

impl MatchResult {
    /// Drop the score, for engines that do not surface it.
    pub fn without_score(self) -> Self {
        Self {
            score: None,
            ..self
        }
    }
}
