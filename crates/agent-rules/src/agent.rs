//! Agent definition parsing.
//!
//! Ties the frontmatter, description and body scanners together into a
//! single [`AgentDefinition`].

use serde::Serialize;

use crate::description::{DescriptionAnalysis, Example, analyze_description};
use crate::frontmatter::{Frontmatter, parse_frontmatter};
use crate::responsibilities::{Responsibility, extract_responsibilities, role_definition};

/// Everything the rule renderer needs from one agent file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct AgentDefinition {
    /// The `name` field. Empty when missing.
    pub name: String,
    /// The raw `description` field.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// The `color` field, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Tools from the `tools` field.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    /// Body prose preceding the responsibilities section.
    pub role: String,
    /// Trigger bullets from the description.
    pub triggers: Vec<String>,
    /// Example interactions from the description.
    pub examples: Vec<Example>,
    /// Numbered responsibilities from the body.
    pub responsibilities: Vec<Responsibility>,
}

/// Parses an agent definition file.
///
/// Never fails: a file without frontmatter yields an agent with an empty
/// name, which the renderer skips.
///
/// # Examples
///
/// ```
/// use agent_rules::parse_agent;
///
/// let agent = parse_agent("---\nname: code-reviewer\ntools: Read, Grep\n---\nYou review code.");
/// assert_eq!(agent.name, "code-reviewer");
/// assert_eq!(agent.tools, vec!["Read", "Grep"]);
/// assert_eq!(agent.role, "You review code.");
/// ```
#[must_use]
pub fn parse_agent(content: &str) -> AgentDefinition {
    let Frontmatter { metadata, body } = parse_frontmatter(content);
    let field = |key: &str| metadata.get(key).map(String::as_str).unwrap_or_default();

    let description = field("description");
    let DescriptionAnalysis { triggers, examples } = analyze_description(description);

    AgentDefinition {
        name: field("name").to_string(),
        description: description.to_string(),
        color: metadata.get("color").filter(|c| !c.is_empty()).cloned(),
        tools: parse_tools(field("tools")),
        role: role_definition(&body).to_string(),
        triggers,
        examples,
        responsibilities: extract_responsibilities(&body),
    }
}

/// Splits a `tools` value into tool names.
///
/// Accepts `Read, Grep` as well as the flow form `[Read, Grep]`.
#[must_use]
pub fn parse_tools(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    value
        .split(',')
        .map(|tool| crate::frontmatter::unquote(tool.trim()))
        .filter(|tool| !tool.is_empty())
        .map(String::from)
        .collect()
}
