//! MCP server exposing sticker autocomplete and delivery.

use crate::config::Config;
use crate::engine::SearchEngine;
use crate::tools::autocomplete::{AutocompleteRequest, handle_autocomplete};
use crate::tools::sticker::{StickerRequest, handle_sticker};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Per-server settings taken from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Maximum number of autocomplete choices; constant for the engine's lifetime
    pub limit: usize,
    /// Directory that relative sticker file paths are resolved against
    pub asset_root: PathBuf,
}

impl ServerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            limit: config.search.limit,
            asset_root: config.asset_root().to_path_buf(),
        }
    }
}

/// MCP server for sticker lookups
#[derive(Clone)]
pub struct StickerServer {
    /// Shared search engine (catalog, index, result cache)
    engine: Arc<SearchEngine>,

    settings: Arc<ServerSettings>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for StickerServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StickerServer")
            .field("engine", &self.engine)
            .field("settings", &self.settings)
            .finish()
    }
}

#[tool_router]
impl StickerServer {
    pub fn new(engine: Arc<SearchEngine>, settings: ServerSettings) -> Self {
        Self {
            engine,
            settings: Arc::new(settings),
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared engine.
    pub fn engine(&self) -> &Arc<SearchEngine> {
        &self.engine
    }

    #[tool(
        description = "Suggest stickers for partially typed text. Returns a JSON array of {name, value} choices ranked by fuzzy match, best first; pass a chosen value to the sticker tool."
    )]
    async fn autocomplete(
        &self,
        Parameters(request): Parameters<AutocompleteRequest>,
    ) -> std::result::Result<String, String> {
        handle_autocomplete(&self.engine, self.settings.limit, request)
    }

    #[tool(
        description = "Post a sticker by its exact text. Returns the sticker's URL, or its file path when stickers are uploaded as files."
    )]
    async fn sticker(
        &self,
        Parameters(request): Parameters<StickerRequest>,
    ) -> std::result::Result<String, String> {
        handle_sticker(&self.engine, &self.settings.asset_root, request)
    }
}

#[tool_handler]
impl ServerHandler for StickerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "sticker-search: fuzzy sticker lookup. Use autocomplete while the user types, \
                 then sticker with the chosen value to get the image.",
            )
    }
}
