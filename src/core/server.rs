//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines a parameters struct, an `execute()` method with the
//! core logic, and a `create_route()` constructor. The ToolRouter is built
//! dynamically in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter, model::*, service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Error;
use crate::domains::{
    prompts::PromptService, resources::ResourceService, tools::ToolContext,
    tools::build_tool_router,
};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between different domain services to handle MCP protocol messages.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Service for handling prompt-related requests.
    prompt_service: Arc<PromptService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        let context = ToolContext::from_config(&config);
        let resource_service = Arc::new(ResourceService::new(&config.storage));
        let prompt_service = Arc::new(PromptService::new(&config.storage));

        Self {
            tool_router: build_tool_router(&context),
            config,
            resource_service,
            prompt_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Serve MCP over stdin/stdout until the client disconnects.
    pub async fn run_stdio(self) -> super::error::Result<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        service
            .waiting()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        info!("STDIO transport finished");
        Ok(())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "A role-playing campaign assistant that helps track campaigns, users, and \
                 events. Finds and plays ambient music through Spotify. Generates images \
                 for encounters, characters, and monsters, and narrative recaps of the \
                 campaign log."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        let prompts = self.prompt_service.list_prompts().await;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        // Convert serde_json::Map to HashMap<String, String>
        let arguments = request.arguments.map(|map| {
            map.into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect()
        });
        self.prompt_service
            .get_prompt(&request.name, arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = McpServer::new(Config::default());
        assert_eq!(server.name(), "campaign-mcp-server");
        assert!(!server.version().is_empty());
    }

    #[test]
    fn test_server_info_enables_all_capabilities() {
        let server = McpServer::new(Config::default());
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
    }
}
