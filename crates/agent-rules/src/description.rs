//! Trigger and example extraction from agent descriptions.
//!
//! Agent descriptions are free text that usually follows a loose
//! convention:
//!
//! ```text
//! Use this agent when:
//! - a pull request needs review
//! Examples:
//! <example>
//! Context: The user just pushed a branch.
//! user: "Can you review this?"
//! assistant: "I'll launch the reviewer."
//! <commentary>Review was requested explicitly.</commentary>
//! </example>
//! ```
//!
//! Every function here is a pure scan over the input text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Phrase that introduces the trigger list.
pub const TRIGGER_MARKER: &str = "Use this agent when";

/// Phrase that ends the trigger list.
pub const EXAMPLES_MARKER: &str = "Examples:";

const CONTEXT_PREFIX: &str = "Context:";
const USER_PREFIX: &str = "user:";
const ASSISTANT_PREFIX: &str = "assistant:";

static EXAMPLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<example>(.*?)</example>").expect("valid regex"));

static COMMENTARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<commentary>(.*?)</commentary>").expect("valid regex"));

/// One sample interaction taken from an `<example>` block.
///
/// Fields missing from the block are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Example {
    /// The `Context:` line.
    pub context: String,
    /// The `user:` line.
    pub user_query: String,
    /// The `assistant:` line.
    pub assistant_response: String,
    /// The `<commentary>` text, whitespace collapsed.
    pub commentary: String,
}

/// Everything extracted from a description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DescriptionAnalysis {
    /// Trigger bullets, in source order.
    pub triggers: Vec<String>,
    /// Example blocks, in source order.
    pub examples: Vec<Example>,
}

/// Extracts triggers and examples from a description.
///
/// Literal `\n` escapes, common in single-line quoted descriptions, are
/// treated as line breaks.
#[must_use]
pub fn analyze_description(text: &str) -> DescriptionAnalysis {
    let text = unescape_newlines(text);
    DescriptionAnalysis {
        triggers: extract_triggers(&text),
        examples: extract_examples(&text),
    }
}

/// Returns the bullet lines between [`TRIGGER_MARKER`] and
/// [`EXAMPLES_MARKER`].
///
/// Empty when the trigger marker is absent.
#[must_use]
pub fn extract_triggers(text: &str) -> Vec<String> {
    let Some((_, rest)) = text.split_once(TRIGGER_MARKER) else {
        return Vec::new();
    };
    let section = rest
        .split_once(EXAMPLES_MARKER)
        .map_or(rest, |(section, _)| section);

    section
        .lines()
        .filter_map(|line| line.trim().strip_prefix(['-', '*']))
        .map(str::trim)
        .filter(|trigger| !trigger.is_empty())
        .map(String::from)
        .collect()
}

/// Returns one [`Example`] per `<example>...</example>` block.
#[must_use]
pub fn extract_examples(text: &str) -> Vec<Example> {
    EXAMPLE_BLOCK
        .captures_iter(text)
        .map(|caps| parse_example(&caps[1]))
        .collect()
}

/// Parses the inside of a single example block.
///
/// Each line is checked against every field prefix; a later match
/// overwrites an earlier one.
#[must_use]
pub fn parse_example(block: &str) -> Example {
    let mut example = Example::default();

    for line in block.lines().map(str::trim) {
        if let Some(value) = line.strip_prefix(CONTEXT_PREFIX) {
            example.context = value.trim().to_string();
        }
        if let Some(value) = line.strip_prefix(USER_PREFIX) {
            example.user_query = value.trim().to_string();
        }
        if let Some(value) = line.strip_prefix(ASSISTANT_PREFIX) {
            example.assistant_response = value.trim().to_string();
        }
    }

    if let Some(caps) = COMMENTARY.captures_iter(block).last() {
        example.commentary = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
    }

    example
}

fn unescape_newlines(text: &str) -> Cow<'_, str> {
    if text.contains("\\n") {
        Cow::Owned(text.replace("\\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "Use this agent when:\n- X happens\n- Y happens\nExamples:\n<example>\nContext: ctx\nuser: hello\nassistant: hi\n<commentary>note</commentary>\n</example>";

    #[test]
    fn analyzes_triggers_and_examples() {
        let analysis = analyze_description(FULL);
        assert_eq!(analysis.triggers, vec!["X happens", "Y happens"]);
        assert_eq!(
            analysis.examples,
            vec![Example {
                context: "ctx".into(),
                user_query: "hello".into(),
                assistant_response: "hi".into(),
                commentary: "note".into(),
            }]
        );
    }

    #[test]
    fn no_trigger_marker_means_no_triggers() {
        let text = "Reviews code.\n- looks like a bullet\n- another";
        assert!(extract_triggers(text).is_empty());
    }

    #[test]
    fn triggers_run_to_end_without_examples_marker() {
        let text = "Use this agent when you need:\n* star bullet\n  -   padded  \nplain line";
        assert_eq!(extract_triggers(text), vec!["star bullet", "padded"]);
    }

    #[test]
    fn triggers_stop_at_examples_marker() {
        let text = "Use this agent when:\n- first\nExamples:\n- not a trigger";
        assert_eq!(extract_triggers(text), vec!["first"]);
    }

    #[test]
    fn triggers_skip_empty_bullets() {
        let text = "Use this agent when:\n-\n- real";
        assert_eq!(extract_triggers(text), vec!["real"]);
    }

    #[test]
    fn extracts_every_example_in_order() {
        let text = "<example>user: one</example> text <example>\nuser: two\n</example>\n<example>\nuser: three\n</example>";
        let examples = extract_examples(text);
        let queries: Vec<_> = examples.iter().map(|e| e.user_query.as_str()).collect();
        assert_eq!(queries, vec!["one", "two", "three"]);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let examples = extract_examples("<example>\nContext: only context\n</example>");
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].context, "only context");
        assert_eq!(examples[0].user_query, "");
        assert_eq!(examples[0].assistant_response, "");
        assert_eq!(examples[0].commentary, "");
    }

    #[test]
    fn unterminated_example_is_ignored() {
        assert!(extract_examples("<example>\nuser: hi\n").is_empty());
    }

    #[test]
    fn later_field_line_overwrites_earlier() {
        let example = parse_example("\nuser: first\nuser: second\n");
        assert_eq!(example.user_query, "second");
    }

    #[test]
    fn multi_line_commentary_is_collapsed() {
        let example = parse_example(
            "\nuser: \"review this\"\n<commentary>\n  Review was\n  requested.\n</commentary>\n",
        );
        assert_eq!(example.user_query, "\"review this\"");
        assert_eq!(example.commentary, "Review was requested.");
    }

    #[test]
    fn literal_newline_escapes_are_unescaped() {
        let text = r"Use this agent when:\n- escaped trigger\nExamples:\n<example>\nuser: hey\n</example>";
        let analysis = analyze_description(text);
        assert_eq!(analysis.triggers, vec!["escaped trigger"]);
        assert_eq!(analysis.examples[0].user_query, "hey");
    }

    #[test]
    fn empty_description_yields_nothing() {
        assert_eq!(analyze_description(""), DescriptionAnalysis::default());
    }
}
