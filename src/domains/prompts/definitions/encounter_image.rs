//! Encounter image prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Prompt for generating an encounter scene image.
pub struct EncounterImagePrompt;

impl PromptDefinition for EncounterImagePrompt {
    const NAME: &'static str = "generate_encounter_image";
    const DESCRIPTION: &'static str = "Generate an image for an encounter based on a description";

    fn template() -> &'static str {
        "Generate a detailed fantasy tabletop role-playing game scene based on this \
         description: {{description}}. Create an atmospheric image with rich details, \
         dramatic lighting, and an immersive environment suitable for a TTRPG \
         encounter background."
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![PromptArgument {
            name: "description".to_string(),
            title: None,
            description: Some("Description of the encounter scene".to_string()),
            required: Some(true),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encounter_image_metadata() {
        assert_eq!(EncounterImagePrompt::NAME, "generate_encounter_image");
        assert!(EncounterImagePrompt::template().contains("{{description}}"));
        assert_eq!(EncounterImagePrompt::arguments().len(), 1);
    }
}
