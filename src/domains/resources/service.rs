//! Resource service implementation.
//!
//! The ResourceService resolves resource URIs against the record stores.
//! Fixed URIs and templates are declared in `registry.rs`; adding a new
//! resource means registering it there and resolving it here.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use serde_json::json;
use tracing::info;

use crate::core::config::StorageConfig;
use crate::domains::store::{CampaignLogEntry, JsonStore, User};

use super::error::ResourceError;
use super::registry::{CAMPAIGN_LOGS_URI, USERS_URI, get_all_resource_templates, get_all_resources};

/// Service for listing and reading store-backed resources.
pub struct ResourceService {
    users: JsonStore<User>,
    campaign_logs: JsonStore<CampaignLogEntry>,
}

impl ResourceService {
    /// Create a new ResourceService over the configured store files.
    pub fn new(storage: &StorageConfig) -> Self {
        info!("Initializing ResourceService");
        Self {
            users: JsonStore::new(storage.users_path()),
            campaign_logs: JsonStore::new(storage.campaign_logs_path()),
        }
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        get_all_resources()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        get_all_resource_templates()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let content = match uri {
            USERS_URI => {
                let users = self.users.read_all().await?;
                ResourceContents::text(serde_json::to_string_pretty(&users)?, uri)
            }
            CAMPAIGN_LOGS_URI => {
                let logs = self.campaign_logs.read_all().await?;
                ResourceContents::text(serde_json::to_string_pretty(&logs)?, uri)
            }
            _ => {
                let user_id = parse_profile_uri(uri).ok_or_else(|| ResourceError::not_found(uri))?;
                let text = match self.users.find(user_id).await? {
                    Some(user) => serde_json::to_string(&user)?,
                    // an unknown id is an answer, not a protocol failure
                    None => json!({"error": "User not found"}).to_string(),
                };
                ResourceContents::text(text, uri)
            }
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }
}

/// Extract the user id from a `users://{user_id}/profile` URI.
fn parse_profile_uri(uri: &str) -> Option<u64> {
    uri.strip_prefix("users://")?
        .strip_suffix("/profile")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_service(dir: &TempDir) -> ResourceService {
        let storage = StorageConfig {
            data_dir: dir.path().to_path_buf(),
        };
        ResourceService::new(&storage)
    }

    fn resource_text(result: &ReadResourceResult) -> &str {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text,
            _ => panic!("Expected text contents"),
        }
    }

    #[test]
    fn test_parse_profile_uri() {
        assert_eq!(parse_profile_uri("users://3/profile"), Some(3));
        assert_eq!(parse_profile_uri("users://abc/profile"), None);
        assert_eq!(parse_profile_uri("users://3"), None);
        assert_eq!(parse_profile_uri("logs://3/profile"), None);
    }

    #[tokio::test]
    async fn test_list_resources() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);

        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 2);
        assert_eq!(service.list_resource_templates().await.len(), 1);
    }

    #[tokio::test]
    async fn test_read_users_from_empty_store() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);

        let result = service.read_resource("users://all").await.unwrap();
        assert_eq!(resource_text(&result), "[]");
    }

    #[tokio::test]
    async fn test_read_user_profile() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);

        let user = User::new("Ann", "ann@example.com", "1 Main St", "555-0100");
        service.users.append(user).await.unwrap();

        let result = service.read_resource("users://1/profile").await.unwrap();
        let text = resource_text(&result);
        assert!(text.contains("\"name\":\"Ann\"") || text.contains("\"name\": \"Ann\""));
    }

    #[tokio::test]
    async fn test_unknown_user_yields_error_payload() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);

        let result = service.read_resource("users://42/profile").await.unwrap();
        assert!(resource_text(&result).contains("User not found"));
    }

    #[tokio::test]
    async fn test_unknown_uri_is_not_found() {
        let dir = TempDir::new().unwrap();
        let service = test_service(&dir);

        let result = service.read_resource("bogus://nope").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }
}
