//! Resource Registry - central registration of all resources.
//!
//! Metadata only; `service.rs` resolves the URIs against the stores.

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, Resource, ResourceTemplate};

/// URI of the full user list.
pub const USERS_URI: &str = "users://all";

/// URI of the full campaign log.
pub const CAMPAIGN_LOGS_URI: &str = "campaign-logs://all";

/// URI template for a single user's profile.
pub const USER_PROFILE_TEMPLATE: &str = "users://{user_id}/profile";

/// Helper to build an annotated resource entry.
fn build_resource(uri: &str, name: &str, description: &str) -> Resource {
    let mut raw = RawResource::new(uri, name);
    raw.description = Some(description.to_string());
    raw.mime_type = Some("application/json".to_string());
    raw.no_annotation()
}

/// Get all registered resources.
///
/// This is the central place where all resources are registered.
/// When adding a new resource, add it here and resolve it in `service.rs`.
pub fn get_all_resources() -> Vec<Resource> {
    vec![
        build_resource(USERS_URI, "All Users", "Get all users in the system"),
        build_resource(
            CAMPAIGN_LOGS_URI,
            "All Campaign Logs",
            "Get all campaign log entries",
        ),
    ]
}

/// Get all registered resource templates.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        RawResourceTemplate {
            uri_template: USER_PROFILE_TEMPLATE.to_string(),
            name: "User Details".to_string(),
            title: Some("User Details".to_string()),
            description: Some("Get a single user's details by id".to_string()),
            mime_type: Some("application/json".to_string()),
        }
        .no_annotation(),
    ]
}

/// Get the list of all fixed resource URIs.
pub fn resource_uris() -> Vec<&'static str> {
    vec![USERS_URI, CAMPAIGN_LOGS_URI]
}
