//! # Document Model
//!
//! The input representation for the typesetter: an ordered list of raw
//! text lines plus the name of the person the resume belongs to, and the
//! configuration that fixes the page canvas and line styles.
//!
//! All geometry is in millimetres with the origin at the top-left corner
//! and y growing downward. Font sizes are in points.

use crate::error::VitaeError;
use crate::style::StyleSheet;
use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;
/// PostScript points per millimetre.
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// A complete document ready for layout. Immutable for one render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Raw source lines, markup and all.
    pub lines: Vec<String>,

    /// Name used to recognise the title line.
    #[serde(default)]
    pub subject_name: String,

    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    pub fn new<S: AsRef<str>>(lines: &[S], subject_name: &str) -> Self {
        Self {
            lines: lines.iter().map(|l| l.as_ref().to_string()).collect(),
            subject_name: subject_name.to_string(),
            metadata: Metadata::default(),
        }
    }

    /// Split Markdown-like text into lines on `\n`. A trailing `\r` is
    /// removed later by markup stripping.
    pub fn from_markdown(text: &str, subject_name: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            subject_name: subject_name.to_string(),
            metadata: Metadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Document metadata embedded in the PDF.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

/// How lines are distributed over pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    /// Start a new page whenever the cursor runs past the printable bound.
    #[default]
    Paginate,
    /// Shrink every size and advance so the whole document lands on one page.
    ScaleToFit,
}

/// Configuration for the page canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Page size. Defaults to A4.
    #[serde(default)]
    pub size: PageSize,

    /// Page margins in millimetres.
    #[serde(default = "default_margin")]
    pub margin: Edges,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin: default_margin(),
        }
    }
}

fn default_margin() -> Edges {
    Edges::uniform(10.0)
}

impl PageConfig {
    /// (width, height) in millimetres.
    pub fn dimensions(&self) -> (f64, f64) {
        self.size.dimensions()
    }

    /// Maximum y at which a line may be placed: page height minus the top
    /// and bottom margins.
    pub fn printable_bound(&self) -> f64 {
        self.dimensions().1 - self.margin.vertical()
    }

    pub fn printable_width(&self) -> f64 {
        self.dimensions().0 - self.margin.horizontal()
    }
}

/// Standard page sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in millimetres.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::A5 => (148.0, 210.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Edge values (top, right, bottom, left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Everything that shapes a render besides the document itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub mode: LayoutMode,

    #[serde(default)]
    pub styles: StyleSheet,

    /// Smallest font size scale-to-fit may shrink text to, in points.
    #[serde(default = "default_min_font_size")]
    pub min_font_size: f64,
}

fn default_min_font_size() -> f64 {
    6.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            mode: LayoutMode::Paginate,
            styles: StyleSheet::default(),
            min_font_size: default_min_font_size(),
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, VitaeError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    /// Reject configurations that cannot hold any text.
    pub fn validate(&self) -> Result<(), VitaeError> {
        let (width, height) = self.page.dimensions();
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(VitaeError::InvalidConfig(format!(
                "page size must be positive, got {} x {}",
                width, height
            )));
        }
        let m = &self.page.margin;
        if [m.top, m.right, m.bottom, m.left]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(VitaeError::InvalidConfig(
                "margins must be finite and non-negative".to_string(),
            ));
        }
        if self.page.printable_width() <= 0.0 || self.page.printable_bound() <= m.top {
            return Err(VitaeError::InvalidConfig(
                "margins leave no printable area".to_string(),
            ));
        }
        for (name, style) in self.styles.styles() {
            if !(style.font_size.is_finite() && style.font_size > 0.0) {
                return Err(VitaeError::InvalidConfig(format!(
                    "{} font size must be positive",
                    name
                )));
            }
            if !(style.advance.is_finite() && style.advance >= 0.0) {
                return Err(VitaeError::InvalidConfig(format!(
                    "{} advance must be non-negative",
                    name
                )));
            }
        }
        if !(self.styles.blank_advance.is_finite() && self.styles.blank_advance >= 0.0) {
            return Err(VitaeError::InvalidConfig(
                "blank advance must be non-negative".to_string(),
            ));
        }
        if !(self.min_font_size.is_finite() && self.min_font_size > 0.0) {
            return Err(VitaeError::InvalidConfig(
                "minimum font size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_geometry() {
        let page = PageConfig::default();
        assert_eq!(page.dimensions(), (210.0, 297.0));
        assert_eq!(page.printable_bound(), 277.0);
        assert_eq!(page.printable_width(), 190.0);
    }

    #[test]
    fn from_markdown_keeps_every_line() {
        let doc = Document::from_markdown("## A\n\nbody\n", "A");
        assert_eq!(doc.lines, vec!["## A", "", "body", ""]);
        assert_eq!(doc.subject_name, "A");
    }

    #[test]
    fn empty_config_is_default() {
        let config = LayoutConfig::from_json("{}").unwrap();
        assert_eq!(config.mode, LayoutMode::Paginate);
        assert_eq!(config.page.margin, Edges::uniform(10.0));
        assert_eq!(config.min_font_size, 6.0);
    }

    #[test]
    fn config_parses_mode_and_size() {
        let config = LayoutConfig::from_json(
            r#"{ "mode": "scaleToFit", "page": { "size": "Letter", "margin": { "top": 15, "right": 12, "bottom": 15, "left": 12 } } }"#,
        )
        .unwrap();
        assert_eq!(config.mode, LayoutMode::ScaleToFit);
        assert_eq!(config.page.size, PageSize::Letter);
        assert_eq!(config.page.printable_width(), 215.9 - 24.0);
    }

    #[test]
    fn custom_page_size() {
        let config = LayoutConfig::from_json(
            r#"{ "page": { "size": { "Custom": { "width": 100, "height": 150 } } } }"#,
        )
        .unwrap();
        assert_eq!(config.page.dimensions(), (100.0, 150.0));
    }

    #[test]
    fn margins_swallowing_page_are_rejected() {
        let err = LayoutConfig::from_json(
            r#"{ "page": { "margin": { "top": 150, "right": 10, "bottom": 150, "left": 10 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, VitaeError::InvalidConfig(_)));
    }

    #[test]
    fn zero_font_size_is_rejected() {
        let err = LayoutConfig::from_json(
            r#"{ "styles": { "body": { "fontSize": 0, "advance": 5 } } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("body font size"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = LayoutConfig::from_json("{ \"mode\": ").unwrap_err();
        assert!(matches!(err, VitaeError::Parse { .. }));
    }
}
