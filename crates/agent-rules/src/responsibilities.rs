//! Responsibility extraction from agent bodies.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Heading that opens the responsibilities section of an agent body.
pub const RESPONSIBILITIES_MARKER: &str = "Your primary responsibilities:";

/// Heading that ends the responsibilities section when present.
pub const DESIGN_PRINCIPLES_MARKER: &str = "**Design Principles";

// A line break, any indentation, then a bullet marker and its spacing.
// `-` needs no following space; `*`, `+` and `•` do, so `**bold**` is kept.
static BULLET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*(?:-\s*|[*+•]\s+)").expect("valid regex"));

// `1. **Title**` or `1. **Title:**`, optionally followed by `:`.
static ITEM_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(\d+\.)[ \t]*\*\*(.+?)\*\*:?").expect("valid regex")
});

/// One numbered duty from the responsibilities section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Responsibility {
    /// The item number including its dot, e.g. `"1."`.
    pub number: String,
    /// The bold title without trailing colon.
    pub title: String,
    /// Content after the title with bullets normalized to `- `.
    pub body: String,
}

/// Returns the prose preceding [`RESPONSIBILITIES_MARKER`], trimmed.
///
/// Returns the whole trimmed body when the marker is absent.
#[must_use]
pub fn role_definition(body: &str) -> &str {
    body.split_once(RESPONSIBILITIES_MARKER)
        .map_or(body, |(role, _)| role)
        .trim()
}

/// Returns the text between [`RESPONSIBILITIES_MARKER`] and
/// [`DESIGN_PRINCIPLES_MARKER`] (or the end of the body).
#[must_use]
pub fn responsibilities_section(body: &str) -> Option<&str> {
    let (_, rest) = body.split_once(RESPONSIBILITIES_MARKER)?;
    Some(
        rest.split_once(DESIGN_PRINCIPLES_MARKER)
            .map_or(rest, |(section, _)| section),
    )
}

/// Extracts the numbered responsibilities of an agent body.
///
/// Empty when the body has no responsibilities section.
#[must_use]
pub fn extract_responsibilities(body: &str) -> Vec<Responsibility> {
    responsibilities_section(body)
        .map(parse_responsibilities)
        .unwrap_or_default()
}

/// Parses numbered, bold-titled items from a section of text.
///
/// Each item's body runs to the next item header or the end of the text.
#[must_use]
pub fn parse_responsibilities(section: &str) -> Vec<Responsibility> {
    let headers: Vec<_> = ITEM_HEADER.captures_iter(section).collect();

    headers
        .iter()
        .enumerate()
        .map(|(i, caps)| {
            let start = caps.get(0).map_or(0, |m| m.end());
            let end = headers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(section.len(), |m| m.start());

            Responsibility {
                number: caps[1].to_string(),
                title: caps[2].trim().trim_end_matches(':').trim_end().to_string(),
                body: normalize_bullets(&section[start..end]),
            }
        })
        .collect()
}

/// Rewrites bullet lines to a single `- ` prefix and trims the text.
///
/// Lines that are not bullets keep their indentation.
#[must_use]
pub fn normalize_bullets(text: &str) -> String {
    BULLET_LINE.replace_all(text.trim(), "\n- ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbered_bold_items() {
        let items = parse_responsibilities("1. **Design**: do things\n- sub a\n2. **Build**: make things");
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].number, "1.");
        assert_eq!(items[0].title, "Design");
        assert_eq!(items[0].body, "do things\n- sub a");

        assert_eq!(items[1].number, "2.");
        assert_eq!(items[1].title, "Build");
        assert_eq!(items[1].body, "make things");
    }

    #[test]
    fn colon_inside_bold_is_dropped() {
        let items = parse_responsibilities("3. **Review:** check everything");
        assert_eq!(items[0].number, "3.");
        assert_eq!(items[0].title, "Review");
        assert_eq!(items[0].body, "check everything");
    }

    #[test]
    fn bullets_are_normalized() {
        let body = normalize_bullets("  intro\n   * star\n\t+ plus\n • dot\n - dash\n**bold** line\n");
        assert_eq!(body, "intro\n- star\n- plus\n- dot\n- dash\n**bold** line");
    }

    #[test]
    fn non_bullet_lines_keep_indentation() {
        let body = normalize_bullets("intro\n    continued here\n  -tight\n      - nested");
        assert_eq!(body, "intro\n    continued here\n- tight\n- nested");
    }

    #[test]
    fn extracts_section_after_marker() {
        let body = "You are a reviewer.\n\nYour primary responsibilities:\n\n1. **Read**: read the diff\n2. **Report**: write findings\n";
        let items = extract_responsibilities(body);
        let titles: Vec<_> = items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Read", "Report"]);
    }

    #[test]
    fn truncates_at_design_principles() {
        let body = "Your primary responsibilities:\n1. **Plan**: plan it\n\n**Design Principles**\n2. **Ignored**: not a duty";
        let items = extract_responsibilities(body);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].body, "plan it");
    }

    #[test]
    fn no_marker_means_no_responsibilities() {
        let body = "1. **Design**: numbered but not in a section";
        assert!(extract_responsibilities(body).is_empty());
        assert!(responsibilities_section(body).is_none());
    }

    #[test]
    fn ignores_numbers_without_bold_title() {
        assert!(parse_responsibilities("1. plain item\n2. another").is_empty());
    }

    #[test]
    fn role_definition_precedes_marker() {
        let body = "You are an expert.\n\nYour primary responsibilities:\n1. **A**: a";
        assert_eq!(role_definition(body), "You are an expert.");
    }

    #[test]
    fn role_definition_is_whole_body_without_marker() {
        assert_eq!(role_definition("  Just prose.\n"), "Just prose.");
    }
}
