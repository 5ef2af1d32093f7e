//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::{
    ArtistListParams, SiteInfoParams, SyncStatusParams, artist_list_impl, site_info_impl, sync_status_impl,
};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use stagehost_core::SyncEngine;

/// The main MCP server handler for stagehost.
#[derive(Clone)]
pub struct StageHostServer {
    tool_router: ToolRouter<Self>,
    engine: SyncEngine,
}

#[tool_router]
impl StageHostServer {
    /// Create a new server handler over a running engine.
    pub fn new(engine: SyncEngine) -> Self {
        Self { tool_router: Self::tool_router(), engine }
    }

    #[tool(
        description = "Resolve the artist behind a site host. Returns artist, description, socials, shop and latest releases from the local replica."
    )]
    async fn site_info(&self, params: Parameters<SiteInfoParams>) -> Result<CallToolResult, McpError> {
        site_info_impl(&self.engine.query(), params.0).await
    }

    #[tool(description = "List mirrored artists in replica order.")]
    async fn artist_list(&self, params: Parameters<ArtistListParams>) -> Result<CallToolResult, McpError> {
        artist_list_impl(&self.engine.query(), params.0).await
    }

    #[tool(description = "Report sync engine state, replica row counts and the last sync cycle.")]
    async fn sync_status(&self, params: Parameters<SyncStatusParams>) -> Result<CallToolResult, McpError> {
        sync_status_impl(&self.engine, params.0).await
    }
}

impl ServerHandler for StageHostServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "stagehost".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some("Read-only access to the local artist content replica.".into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
