//! Inline markup removal.
//!
//! Resume text carries presentational HTML (`<div align="center">`, `<br>`)
//! that only matters to the on-screen preview. Layout decisions ignore it.

use regex::Regex;
use std::sync::OnceLock;

/// Marker that opens a section heading (and the title line).
pub const HEADING_MARKER: &str = "## ";
/// Marker that opens an entry heading.
pub const SUBHEADING_MARKER: &str = "### ";
pub const BULLET_MARKER: &str = "- ";
pub const EMPHASIS_MARKER: &str = "**";

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

/// Remove every `<...>` tag and trim surrounding whitespace.
///
/// Unterminated tags (`a < b`) are left alone. Applying this to its own
/// output is a no-op.
pub fn strip_markup(line: &str) -> String {
    tag_pattern().replace_all(line, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_div_wrappers() {
        assert_eq!(
            strip_markup(r#"## <div align="center">Jane Doe</div>"#),
            "## Jane Doe"
        );
        assert_eq!(strip_markup(r#"<div align="center">"#), "");
        assert_eq!(strip_markup("  </div>  "), "");
    }

    #[test]
    fn unterminated_tag_passes_through() {
        assert_eq!(strip_markup("a < b and c"), "a < b and c");
        assert_eq!(strip_markup("**bold"), "**bold");
    }

    #[test]
    fn empty_brackets_are_not_tags() {
        assert_eq!(strip_markup("x <> y"), "x <> y");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "<b>Bold</b> text",
            "<<b>a>",
            "<a<b>c>",
            "  padded <br>  ",
            "",
            "## <span>Name</span>",
        ];
        for input in inputs {
            let once = strip_markup(input);
            assert_eq!(strip_markup(&once), once, "input: {:?}", input);
        }
    }
}
