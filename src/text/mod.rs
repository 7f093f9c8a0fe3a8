//! # Text Layout
//!
//! Text measurement and greedy line breaking.
//!
//! Measurement is a capability handed to the layout engine rather than a
//! global: production code uses [`FontContext`](crate::font::FontContext)
//! with real font metrics, tests use [`FixedAdvance`] so geometry is exact.

use crate::style::FontSpec;
use unicode_linebreak::linebreaks;

/// Measures and wraps text. Widths are in layout units.
pub trait TextMeasure {
    /// Width of `text` set in `font`.
    fn text_width(&self, text: &str, font: &FontSpec) -> f64;

    /// Split `text` into lines no wider than `max_width`.
    ///
    /// Always returns at least one line.
    fn wrap(&self, text: &str, font: &FontSpec, max_width: f64) -> Vec<String> {
        TextLayout::new().break_into_lines(self, text, font, max_width)
    }
}

/// A measurer where every character has the same advance, regardless of
/// font. Useful wherever layout must be predictable to the millimetre.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    pub char_width: f64,
}

impl FixedAdvance {
    pub fn new(char_width: f64) -> Self {
        Self { char_width }
    }
}

impl TextMeasure for FixedAdvance {
    fn text_width(&self, text: &str, _font: &FontSpec) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

/// Split text at UAX#14 break opportunities. Each segment keeps its
/// trailing whitespace.
fn break_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (end, _) in linebreaks(text) {
        if end > start {
            segments.push(&text[start..end]);
        }
        start = end;
    }
    segments
}

#[derive(Debug, Default)]
pub struct TextLayout;

impl TextLayout {
    pub fn new() -> Self {
        Self
    }

    /// Break a string into lines that fit within `max_width`.
    ///
    /// Greedy: each line takes as many whole segments as fit. Trailing
    /// whitespace does not count toward a line's width. A segment wider
    /// than a full line is split between characters.
    pub fn break_into_lines<M: TextMeasure + ?Sized>(
        &self,
        measure: &M,
        text: &str,
        font: &FontSpec,
        max_width: f64,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for segment in break_segments(text) {
            let mut candidate = current.clone();
            candidate.push_str(segment);
            if measure.text_width(candidate.trim_end(), font) <= max_width {
                current = candidate;
                continue;
            }

            if !current.trim_end().is_empty() {
                lines.push(current.trim_end().to_string());
            }
            current = String::new();

            if measure.text_width(segment.trim_end(), font) <= max_width {
                current.push_str(segment);
            } else {
                let mut pieces = self.split_long_segment(measure, segment, font, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces.iter().map(|p| p.trim_end().to_string()));
            }
        }

        let last = current.trim_end();
        if !last.is_empty() || lines.is_empty() {
            lines.push(last.to_string());
        }
        lines
    }

    /// Character-level fallback for a segment with no break opportunity
    /// narrow enough. Every piece holds at least one character.
    fn split_long_segment<M: TextMeasure + ?Sized>(
        &self,
        measure: &M,
        segment: &str,
        font: &FontSpec,
        max_width: f64,
    ) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        for ch in segment.chars() {
            piece.push(ch);
            let fits = measure.text_width(piece.trim_end(), font) <= max_width;
            if !fits && piece.chars().count() > 1 {
                piece.pop();
                pieces.push(std::mem::take(&mut piece));
                piece.push(ch);
            }
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }

    /// Width of the widest wrapped line.
    pub fn measure_widest<M: TextMeasure + ?Sized>(
        &self,
        measure: &M,
        lines: &[String],
        font: &FontSpec,
    ) -> f64 {
        lines
            .iter()
            .map(|l| measure.text_width(l, font))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;
    use crate::style::FontWeight;

    fn font() -> FontSpec {
        FontSpec::new(12.0, FontWeight::Normal)
    }

    #[test]
    fn short_text_is_one_line() {
        let m = FixedAdvance::new(1.0);
        assert_eq!(m.wrap("hello world", &font(), 100.0), vec!["hello world"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let m = FixedAdvance::new(1.0);
        assert_eq!(m.wrap("", &font(), 10.0), vec![""]);
    }

    #[test]
    fn breaks_at_spaces() {
        let m = FixedAdvance::new(1.0);
        let lines = m.wrap("aaa bbb ccc ddd", &font(), 7.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn trailing_space_does_not_count() {
        let m = FixedAdvance::new(1.0);
        // "aaa bbb " is 8 wide but trims to 7.
        let lines = m.wrap("aaa bbb c", &font(), 7.0);
        assert_eq!(lines, vec!["aaa bbb", "c"]);
    }

    #[test]
    fn overlong_word_is_split() {
        let m = FixedAdvance::new(1.0);
        let lines = m.wrap("abcdefghij xy", &font(), 4.0);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn rewrapping_is_stable() {
        let m = FixedAdvance::new(1.0);
        let text = "the quick brown fox jumps over the lazy dog again and again";
        for line in m.wrap(text, &font(), 13.0) {
            assert_eq!(m.wrap(&line, &font(), 13.0), vec![line.clone()]);
        }
    }

    #[test]
    fn hyphen_is_a_break_opportunity() {
        let m = FixedAdvance::new(1.0);
        let lines = m.wrap("state-of-the-art", &font(), 9.0);
        assert_eq!(lines[0], "state-of-");
    }

    #[test]
    fn real_metrics_wrap_within_width() {
        let ctx = FontContext::new();
        let text = "Led a team of five engineers delivering a distributed ingestion \
                    pipeline that processed twelve million events per day with \
                    subsecond latency across three regions.";
        let lines = ctx.wrap(text, &font(), 190.0);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(ctx.text_width(line, &font()) <= 190.0);
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn widest_line() {
        let m = FixedAdvance::new(2.0);
        let lines = vec!["ab".to_string(), "abcd".to_string()];
        assert_eq!(TextLayout::new().measure_widest(&m, &lines, &font()), 8.0);
    }
}
