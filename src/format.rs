//! Rendering of matches and deliveries for chat replies.

use crate::catalog::ResourceRef;
use crate::types::MatchResult;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Longest label a choice may carry, in characters.
pub const MAX_LABEL_CHARS: usize = 100;

/// One autocomplete choice: what the user sees and what gets sent back on commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub name: String,
    pub value: String,
}

impl From<&MatchResult> for Choice {
    fn from(result: &MatchResult) -> Self {
        Self {
            name: choice_label(result),
            value: result.key.clone(),
        }
    }
}

/// Display text, with ` | score: <score>` appended when the match carries a score.
pub fn choice_label(result: &MatchResult) -> String {
    let label = match result.score {
        Some(score) => format!("{} | score: {:.3}", result.display_text, score),
        None => result.display_text.clone(),
    };
    truncate_chars(label, MAX_LABEL_CHARS)
}

/// Render matches as a JSON array of `{name, value}` choices.
pub fn format_choices(results: &[MatchResult]) -> serde_json::Result<String> {
    let choices: Vec<Choice> = results.iter().map(Choice::from).collect();
    serde_json::to_string(&choices)
}

/// What to send back for a committed sticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Upload this file
    File(PathBuf),
    /// Reply with this link
    Link(String),
}

impl Delivery {
    /// Resolve a resource reference; relative file paths are joined onto `asset_root`.
    pub fn from_resource(resource: &ResourceRef, asset_root: &Path) -> Self {
        match resource {
            ResourceRef::FilePath(path) => Self::File(asset_root.join(path)),
            ResourceRef::Url(url) => Self::Link(url.clone()),
        }
    }

    /// Reply text for the delivery.
    pub fn render(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Link(url) => url.clone(),
        }
    }
}

/// Reply for a sticker key that is not in the catalog.
pub fn not_found_message(text: &str) -> String {
    format!("Sticker not found\n\nSticker with text {} not found.", text)
}

fn truncate_chars(mut text: String, max: usize) -> String {
    if let Some((cut, _)) = text.char_indices().nth(max) {
        text.truncate(cut);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn result(text: &str, score: Option<f64>) -> MatchResult {
        MatchResult {
            key: text.to_string(),
            display_text: text.to_string(),
            score,
        }
    }

    #[rstest]
    #[case(None, "category")]
    #[case(Some(0.0), "category | score: 0.000")]
    #[case(Some(0.1), "category | score: 0.100")]
    fn test_choice_label(#[case] score: Option<f64>, #[case] expected: &str) {
        check!(choice_label(&result("category", score)) == expected);
    }

    #[test]
    fn test_label_truncated_value_kept() {
        let long = "ä".repeat(150);
        let choice = Choice::from(&result(&long, None));
        check!(choice.name.chars().count() == MAX_LABEL_CHARS);
        check!(choice.value == long);
    }

    #[test]
    fn test_format_choices() {
        let json = format_choices(&[result("cat", None), result("category", Some(0.1))]).unwrap();
        check!(
            json == r#"[{"name":"cat","value":"cat"},{"name":"category | score: 0.100","value":"category"}]"#
        );
        check!(format_choices(&[]).unwrap() == "[]");
    }

    #[test]
    fn test_delivery() {
        let root = Path::new("/srv/stickers");

        let file = Delivery::from_resource(&ResourceRef::FilePath("img/cat.png".to_string()), root);
        check!(file == Delivery::File(PathBuf::from("/srv/stickers/img/cat.png")));

        let absolute = Delivery::from_resource(&ResourceRef::FilePath("/tmp/cat.png".to_string()), root);
        check!(absolute.render() == "/tmp/cat.png");

        let link = Delivery::from_resource(&ResourceRef::Url("https://cdn.test/cat.png".to_string()), root);
        check!(link.render() == "https://cdn.test/cat.png");
    }
}
