//! # Style System
//!
//! Per-line typography for the resume typesetter. Every line class gets a
//! fixed font size, weight, alignment, and vertical advance. There is no
//! cascade: the style sheet is a flat table keyed by [`LineClass`].
//!
//! Sizes are in points, advances in layout units (millimetres).

use crate::classify::LineClass;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Courier,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Everything the measurer needs to know about a font.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub family: FontFamily,
    /// Font size in points.
    pub size: f64,
    pub weight: FontWeight,
}

impl FontSpec {
    pub fn new(size: f64, weight: FontWeight) -> Self {
        Self {
            family: FontFamily::Helvetica,
            size,
            weight,
        }
    }
}

/// Style for one line class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub font_size: f64,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub align: TextAlign,
    /// Vertical cursor advance after the line. For body text this is the
    /// advance per wrapped line.
    pub advance: f64,
}

impl LineStyle {
    const fn new(font_size: f64, weight: FontWeight, align: TextAlign, advance: f64) -> Self {
        Self {
            font_size,
            weight,
            align,
            advance,
        }
    }
}

/// The full table of line styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSheet {
    pub font_family: FontFamily,
    pub title: LineStyle,
    pub contact: LineStyle,
    pub heading: LineStyle,
    pub subheading: LineStyle,
    pub bullet: LineStyle,
    pub body: LineStyle,
    /// Advance for a blank line. Blank lines draw nothing.
    pub blank_advance: f64,
}

impl Default for StyleSheet {
    fn default() -> Self {
        use FontWeight::*;
        use TextAlign::*;
        Self {
            font_family: FontFamily::Helvetica,
            title: LineStyle::new(20.0, Bold, Center, 10.0),
            contact: LineStyle::new(12.0, Normal, Center, 8.0),
            heading: LineStyle::new(16.0, Bold, Left, 8.0),
            subheading: LineStyle::new(14.0, Bold, Left, 6.0),
            bullet: LineStyle::new(12.0, Normal, Left, 5.0),
            body: LineStyle::new(12.0, Normal, Left, 5.0),
            blank_advance: 3.0,
        }
    }
}

impl StyleSheet {
    /// Look up the style for a class. Blank lines have no text style and
    /// return `None`.
    pub fn for_class(&self, class: LineClass) -> Option<&LineStyle> {
        match class {
            LineClass::Title => Some(&self.title),
            LineClass::Contact => Some(&self.contact),
            LineClass::Heading => Some(&self.heading),
            LineClass::Subheading => Some(&self.subheading),
            LineClass::BulletOrEmphasis => Some(&self.bullet),
            LineClass::Body => Some(&self.body),
            LineClass::Blank => None,
        }
    }

    /// The font a class is drawn with.
    pub fn font_for(&self, style: &LineStyle) -> FontSpec {
        FontSpec {
            family: self.font_family,
            size: style.font_size,
            weight: style.weight,
        }
    }

    /// Shrink every size and advance by `factor`. Font sizes never drop
    /// below `min_font_size`.
    pub fn scaled(&self, factor: f64, min_font_size: f64) -> Self {
        let scale = |s: &LineStyle| LineStyle {
            font_size: (s.font_size * factor).max(min_font_size),
            advance: s.advance * factor,
            ..*s
        };
        Self {
            font_family: self.font_family,
            title: scale(&self.title),
            contact: scale(&self.contact),
            heading: scale(&self.heading),
            subheading: scale(&self.subheading),
            bullet: scale(&self.bullet),
            body: scale(&self.body),
            blank_advance: self.blank_advance * factor,
        }
    }

    pub(crate) fn styles(&self) -> [(&'static str, &LineStyle); 6] {
        [
            ("title", &self.title),
            ("contact", &self.contact),
            ("heading", &self.heading),
            ("subheading", &self.subheading),
            ("bullet", &self.bullet),
            ("body", &self.body),
        ]
    }
}
