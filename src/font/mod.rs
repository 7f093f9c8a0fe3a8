//! # Font Management
//!
//! Resume output only uses the standard PDF fonts (Helvetica and Courier,
//! regular and bold), which need no embedding. This module resolves a
//! [`FontSpec`] to one of them and measures text with its real widths.

pub mod metrics;

pub use metrics::StandardFontMetrics;

use crate::model::MM_PER_PT;
use crate::style::{FontFamily, FontSpec, FontWeight};
use crate::text::TextMeasure;

/// The standard PDF fonts Vitae can draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        }
    }

    pub fn metrics(&self) -> StandardFontMetrics {
        match self {
            Self::Helvetica => metrics::HELVETICA,
            Self::HelveticaBold => metrics::HELVETICA_BOLD,
            Self::Courier | Self::CourierBold => metrics::COURIER,
        }
    }

    /// Pick the face for a family and weight.
    pub fn resolve(family: FontFamily, weight: FontWeight) -> Self {
        match (family, weight) {
            (FontFamily::Helvetica, FontWeight::Normal) => Self::Helvetica,
            (FontFamily::Helvetica, FontWeight::Bold) => Self::HelveticaBold,
            (FontFamily::Courier, FontWeight::Normal) => Self::Courier,
            (FontFamily::Courier, FontWeight::Bold) => Self::CourierBold,
        }
    }
}

/// Text measurement backed by standard font metrics.
///
/// Widths are returned in layout units (millimetres).
#[derive(Debug, Clone, Copy, Default)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    /// Width of a single character in points.
    pub fn char_width(&self, ch: char, font: &FontSpec) -> f64 {
        StandardFont::resolve(font.family, font.weight)
            .metrics()
            .char_width(ch, font.size)
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font: &FontSpec) -> f64 {
        StandardFont::resolve(font.family, font.weight)
            .metrics()
            .measure_string(text, font.size)
    }
}

impl TextMeasure for FontContext {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        self.measure_string(text, font) * MM_PER_PT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(size: f64, weight: FontWeight) -> FontSpec {
        FontSpec::new(size, weight)
    }

    #[test]
    fn test_font_context_helvetica() {
        let ctx = FontContext::new();
        let w = ctx.char_width(' ', &spec(12.0, FontWeight::Normal));
        assert!((w - 3.336).abs() < 0.001);
    }

    #[test]
    fn test_font_context_bold_wider() {
        let ctx = FontContext::new();
        let regular = ctx.measure_string("Summary", &spec(12.0, FontWeight::Normal));
        let bold = ctx.measure_string("Summary", &spec(12.0, FontWeight::Bold));
        assert!(bold > regular, "Bold text should be wider than regular");
    }

    #[test]
    fn test_text_width_in_millimetres() {
        let ctx = FontContext::new();
        let pt = ctx.measure_string("Hello", &spec(12.0, FontWeight::Normal));
        let mm = ctx.text_width("Hello", &spec(12.0, FontWeight::Normal));
        assert!((mm - pt * 25.4 / 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_faces() {
        assert_eq!(
            StandardFont::resolve(FontFamily::Helvetica, FontWeight::Bold).pdf_name(),
            "Helvetica-Bold"
        );
        assert_eq!(
            StandardFont::resolve(FontFamily::Courier, FontWeight::Normal).pdf_name(),
            "Courier"
        );
    }
}
