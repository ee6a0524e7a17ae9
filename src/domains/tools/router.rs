//! Tool Router - builds the rmcp ToolRouter from the definitions.
//!
//! Each tool knows how to create its own route; this module only hands each
//! one the services it needs from the [`ToolContext`].

use rmcp::handler::server::tool::ToolRouter;

use super::context::ToolContext;
use super::definitions::{
    BackgroundImageTool, CampaignLogCreateTool, CampaignLogLatestTool, CampaignLogSummarizeTool,
    CharacterImageTool, MonsterImageTool, SpotifyPlayTool, SpotifySearchTool,
    UserCreateRandomTool, UserCreateTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(ctx: &ToolContext) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(SpotifySearchTool::create_route(ctx.spotify.clone()))
        .with_route(SpotifyPlayTool::create_route(ctx.spotify.clone()))
        .with_route(UserCreateTool::create_route(ctx.users.clone()))
        .with_route(UserCreateRandomTool::create_route(
            ctx.generation.clone(),
            ctx.users.clone(),
        ))
        .with_route(CampaignLogCreateTool::create_route(ctx.campaign_logs.clone()))
        .with_route(CampaignLogLatestTool::create_route(ctx.campaign_logs.clone()))
        .with_route(CampaignLogSummarizeTool::create_route(
            ctx.campaign_logs.clone(),
            ctx.generation.clone(),
        ))
        .with_route(BackgroundImageTool::create_route(ctx.generation.clone()))
        .with_route(CharacterImageTool::create_route(ctx.generation.clone()))
        .with_route(MonsterImageTool::create_route(
            ctx.http.clone(),
            ctx.generation.clone(),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;

    struct TestServer {}

    fn test_context() -> ToolContext {
        ToolContext::from_config(&Config::default())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(&test_context());
        let tools = router.list_all();
        assert_eq!(tools.len(), 10);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"spotify_search"));
        assert!(names.contains(&"spotify_play"));
        assert!(names.contains(&"user_create"));
        assert!(names.contains(&"user_create_random"));
        assert!(names.contains(&"campaign_log_create"));
        assert!(names.contains(&"campaign_log_latest"));
        assert!(names.contains(&"campaign_log_summarize"));
        assert!(names.contains(&"image_background"));
        assert!(names.contains(&"image_character"));
        assert!(names.contains(&"monster_image"));
    }

    #[test]
    fn test_every_tool_has_a_description() {
        let router: ToolRouter<TestServer> = build_tool_router(&test_context());
        for tool in router.list_all() {
            assert!(
                tool.description.as_ref().is_some_and(|d| !d.is_empty()),
                "tool {} has no description",
                tool.name
            );
        }
    }
}
