//! Rule document rendering.
//!
//! A rule is a fixed-template markdown document built from an
//! [`AgentDefinition`]. Rendering is deterministic: the same agent always
//! produces byte-identical output.

use crate::agent::AgentDefinition;
use crate::description::Example;
use crate::responsibilities::Responsibility;

/// File extension of rendered rule documents.
pub const RULE_EXTENSION: &str = "md";

/// Maximum number of examples rendered into a rule.
pub const MAX_EXAMPLES: usize = 3;

/// Trigger bullet used when the description lists none.
pub const FALLBACK_TRIGGER: &str = "Agent-specific tasks and expertise areas";

/// Bullets rendered into every rule's studio integration section.
pub const STUDIO_INTEGRATION: [&str; 4] = [
    "Follow 6-day sprint methodology",
    "Balance rapid development with code quality",
    "Ensure maintainable solutions",
    "Create delightful user experiences",
];

/// Tools listed when the agent declares none.
pub const FALLBACK_TOOLS: [&str; 4] = [
    "File system operations (read, write, search)",
    "Terminal commands",
    "Code analysis and modification",
    "Web search for research",
];

/// Renders the rule document for an agent.
///
/// Returns `None` when the agent has no name; callers treat that as a
/// skip rather than a failure.
#[must_use]
pub fn render_rule(agent: &AgentDefinition) -> Option<String> {
    if agent.name.trim().is_empty() {
        return None;
    }

    let mut rule = format!(
        "# {} Agent\n\n## Role Definition\n{}\n\n## Activation Triggers\n",
        title_case(&agent.name),
        agent.role
    );

    if agent.triggers.is_empty() {
        rule.push_str(&bullet_lines([FALLBACK_TRIGGER]));
    } else {
        rule.push_str(&bullet_lines(&agent.triggers));
    }

    rule.push_str("\n## Core Responsibilities\n\n");
    for responsibility in &agent.responsibilities {
        rule.push_str(&render_responsibility(responsibility));
    }

    rule.push_str("## Studio Integration\n");
    rule.push_str(&bullet_lines(STUDIO_INTEGRATION));

    rule.push_str("\n## Example Usage\n");
    for (i, example) in agent.examples.iter().take(MAX_EXAMPLES).enumerate() {
        rule.push_str(&render_example(i + 1, example));
    }

    // The tools list is the last line and carries no trailing newline.
    rule.push_str("## Tools Access\n");
    let tools = if agent.tools.is_empty() {
        bullet_lines(FALLBACK_TOOLS)
    } else {
        bullet_lines(&agent.tools)
    };
    rule.push_str(tools.trim_end_matches('\n'));

    Some(rule)
}

/// Turns an agent name into a display title.
///
/// `-` and `_` become spaces. Each run of letters starts uppercase and
/// continues lowercase, so `graphQL-expert` becomes `Graphql Expert`.
///
/// ```
/// use agent_rules::rule::title_case;
///
/// assert_eq!(title_case("code-reviewer"), "Code Reviewer");
/// assert_eq!(title_case("api_designer"), "Api Designer");
/// ```
#[must_use]
pub fn title_case(name: &str) -> String {
    let mut previous_is_letter = false;
    name.chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .flat_map(|c| {
            let mapped: Vec<char> = if previous_is_letter {
                c.to_lowercase().collect()
            } else {
                c.to_uppercase().collect()
            };
            previous_is_letter = c.is_alphabetic();
            mapped
        })
        .collect()
}

/// File name of the rule rendered for `name`.
///
/// Path separators in the name are replaced so the file always lands
/// directly inside the output directory.
#[must_use]
pub fn rule_file_name(name: &str) -> String {
    let stem = name.trim().replace(['/', '\\'], "-");
    format!("{stem}.{RULE_EXTENSION}")
}

fn bullet_lines<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("- {}\n", item.as_ref()))
        .collect()
}

fn render_responsibility(responsibility: &Responsibility) -> String {
    format!(
        "### {} {}\n{}\n\n",
        responsibility.number, responsibility.title, responsibility.body
    )
}

fn render_example(n: usize, example: &Example) -> String {
    let mut block = format!(
        "**Example {n}:** {}\n- **User:** {}\n- **Approach:** {}\n",
        example.context, example.user_query, example.assistant_response
    );
    if !example.commentary.is_empty() {
        block.push_str(&format!("- **Rationale:** {}\n", example.commentary));
    }
    block.push('\n');
    block
}
