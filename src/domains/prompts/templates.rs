//! Prompt templates module.
//!
//! This module contains the PromptTemplate struct and its rendering logic.
//! Templates use a simple `{{variable}}` substitution syntax; placeholders
//! with no matching argument are removed from the output.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template string with `{{variable}}` placeholders.
    pub template: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
        }
    }

    /// Render the template with the given arguments.
    ///
    /// `{{variable}}` is replaced with the value of `variable`; placeholders
    /// left unmatched after substitution are removed.
    pub fn render(&self, arguments: &HashMap<String, String>) -> String {
        let mut result = self.template.clone();

        for (key, value) in arguments {
            let placeholder = format!("{{{{{}}}}}", key);
            result = result.replace(&placeholder, value);
        }

        clean_unmatched_placeholders(&result)
    }
}

/// Remove any unmatched `{{...}}` placeholders.
fn clean_unmatched_placeholders(template: &str) -> String {
    let mut result = template.to_string();

    while let Some(start) = result.find("{{") {
        match result[start..].find("}}") {
            Some(end) => {
                result = format!("{}{}", &result[..start], &result[start + end + 2..]);
            }
            None => break,
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(text: &str) -> PromptTemplate {
        PromptTemplate::new("test", None, vec![], text)
    }

    #[test]
    fn test_simple_substitution() {
        let mut args = HashMap::new();
        args.insert("name".to_string(), "World".to_string());

        let result = template("Hello, {{name}}!").render(&args);
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_multiple_substitutions() {
        let mut args = HashMap::new();
        args.insert("a".to_string(), "1".to_string());
        args.insert("b".to_string(), "2".to_string());

        let result = template("{{a}} and {{b}} and {{a}}").render(&args);
        assert_eq!(result, "1 and 2 and 1");
    }

    #[test]
    fn test_unmatched_placeholder_is_removed() {
        let args = HashMap::new();
        let result = template("Hello, {{name}}!").render(&args);
        assert_eq!(result, "Hello, !");
    }

    #[test]
    fn test_unterminated_placeholder_is_left_alone() {
        let args = HashMap::new();
        let result = template("Hello, {{name").render(&args);
        assert_eq!(result, "Hello, {{name");
    }
}
