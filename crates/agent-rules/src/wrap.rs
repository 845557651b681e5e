//! Wrapping arbitrary markdown documents as rules.

/// File extension of wrapped documents.
pub const WRAPPED_EXTENSION: &str = "mdc";

/// Glob written into every wrapped document.
pub const WILDCARD_GLOB: &str = "**/*.*";

/// Suffix appended to the title to form the description.
pub const DESCRIPTION_SUFFIX: &str = " - AI agent specialized in specific domain expertise";

const HEADING_PREFIX: &str = "# ";

/// Derives the title of a document.
///
/// Uses the first line when it is a level-one heading (`# `), otherwise
/// `stem` (the input file name without extension).
///
/// ```
/// use agent_rules::wrap::derive_title;
///
/// assert_eq!(derive_title("# My Title\n\nText", "notes"), "My Title");
/// assert_eq!(derive_title("## Section\n", "notes"), "notes");
/// ```
#[must_use]
pub fn derive_title<'a>(content: &'a str, stem: &'a str) -> &'a str {
    content
        .split('\n')
        .next()
        .and_then(|line| line.strip_prefix(HEADING_PREFIX))
        .map_or(stem, str::trim)
}

/// Builds the frontmatter block for a wrapped document.
#[must_use]
pub fn synthesize_frontmatter(title: &str) -> String {
    format!(
        "---\ndescription: {title}{DESCRIPTION_SUFFIX}\nglobs: {WILDCARD_GLOB}\nalwaysApply: false\n---\n"
    )
}

/// Prefixes `content` with a synthesized frontmatter block.
///
/// The input content follows a blank line, unmodified.
#[must_use]
pub fn wrap_document(content: &str, stem: &str) -> String {
    let frontmatter = synthesize_frontmatter(derive_title(content, stem));
    format!("{frontmatter}\n{content}")
}

/// File name of the wrapped document for an input stem.
#[must_use]
pub fn wrapped_file_name(stem: &str) -> String {
    format!("{stem}.{WRAPPED_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_level_one_heading() {
        assert_eq!(derive_title("# My Title", "file"), "My Title");
        assert_eq!(derive_title("#   Padded  \r\nbody", "file"), "Padded");
    }

    #[test]
    fn deeper_headings_fall_back_to_stem() {
        assert_eq!(derive_title("## Sub", "stem"), "stem");
        assert_eq!(derive_title("### Deep\nbody", "stem"), "stem");
    }

    #[test]
    fn title_falls_back_to_stem() {
        assert_eq!(derive_title("Intro paragraph\n# Later heading", "style-guide"), "style-guide");
        assert_eq!(derive_title("", "empty"), "empty");
        assert_eq!(derive_title("#\nbody", "bare"), "bare");
        assert_eq!(derive_title("\n# After blank", "blank"), "blank");
    }

    #[test]
    fn wraps_with_frontmatter_and_blank_line() {
        let content = "# My Title\nx";
        let wrapped = wrap_document(content, "f");
        assert_eq!(
            wrapped,
            "---\ndescription: My Title - AI agent specialized in specific domain expertise\nglobs: **/*.*\nalwaysApply: false\n---\n\n# My Title\nx"
        );
    }

    #[test]
    fn description_keeps_title_verbatim() {
        let block = synthesize_frontmatter("Ops: Runbooks");
        assert!(block.contains(
            "\ndescription: Ops: Runbooks - AI agent specialized in specific domain expertise\n"
        ));
    }

    #[test]
    fn wrapped_file_name_swaps_extension() {
        assert_eq!(wrapped_file_name("style-guide"), "style-guide.mdc");
    }
}
