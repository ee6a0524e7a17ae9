//! Fake user prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Prompt for generating a fake user around a given name.
pub struct FakeUserPrompt;

impl PromptDefinition for FakeUserPrompt {
    const NAME: &'static str = "generate_fake_user";
    const DESCRIPTION: &'static str = "Generate a fake user based on a given name";

    fn template() -> &'static str {
        "Generate a fake user with the name {{name}}. The user should have a \
         realistic email, address, and phone number."
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![PromptArgument {
            name: "name".to_string(),
            title: None,
            description: Some("The name of the user to generate".to_string()),
            required: Some(true),
        }]
    }
}
