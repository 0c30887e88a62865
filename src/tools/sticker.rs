//! Sticker handler: delivers the committed sticker.

use crate::engine::SearchEngine;
use crate::format::{Delivery, not_found_message};
use rmcp::schemars;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StickerRequest {
    /// Exact sticker text, normally a value returned by autocomplete
    pub text: String,
}

/// Look up the sticker and reply with its file path or URL.
///
/// Unknown text is answered with a "not found" message rather than an error.
pub fn handle_sticker(
    engine: &SearchEngine,
    asset_root: &Path,
    request: StickerRequest,
) -> Result<String, String> {
    tracing::info!("Got sticker request for '{}'", request.text);

    match engine.resolve_key(&request.text) {
        Ok(record) => {
            let delivery = Delivery::from_resource(&record.resource, asset_root);
            match &delivery {
                Delivery::File(path) => tracing::info!("Uploading file path: {}", path.display()),
                Delivery::Link(url) => tracing::info!("Responding with url: {}", url),
            }
            Ok(delivery.render())
        }
        Err(not_found) => {
            tracing::warn!("{}", not_found);
            Ok(not_found_message(&not_found.key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ItemRecord, ResourceRef};
    use crate::engine::EngineOptions;
    use crate::search::FieldWeights;
    use assert2::check;
    use rstest::rstest;

    fn engine() -> SearchEngine {
        let catalog = Catalog::load(vec![
            ItemRecord::new("cat", ResourceRef::Url("https://cdn.test/cat.png".to_string())),
            ItemRecord::new("dog", ResourceRef::FilePath("images/dog.png".to_string())),
        ])
        .unwrap();
        SearchEngine::new(catalog, &FieldWeights::default(), EngineOptions::default()).unwrap()
    }

    #[rstest]
    #[case("cat", "https://cdn.test/cat.png")]
    #[case("dog", "/srv/bot/images/dog.png")]
    fn test_delivers_resource(#[case] text: &str, #[case] expected: &str) {
        let request = StickerRequest {
            text: text.to_string(),
        };
        let reply = handle_sticker(&engine(), Path::new("/srv/bot"), request).unwrap();
        check!(reply == expected);
    }

    #[test]
    fn test_unknown_sticker_is_a_reply() {
        let request = StickerRequest {
            text: "bird".to_string(),
        };
        let reply = handle_sticker(&engine(), Path::new("/srv/bot"), request).unwrap();
        check!(reply.contains("Sticker with text bird not found."));
    }
}
