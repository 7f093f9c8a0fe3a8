//! # Page-Aware Layout Engine
//!
//! One forward pass over the document's lines. Each line goes through
//! four steps:
//!
//! 1. **classify**: strip markup and assign a [`LineClass`]
//! 2. **measure**: pick the class style and wrap body text into a block
//! 3. **paginate**: ask [`page_break::decide_break`] whether the block
//!    still fits on the current page
//! 4. **emit**: position every line of the block as a [`Run`]
//!
//! The page is the unit of layout. Content is placed *into* a page with
//! known dimensions; a block that doesn't fit starts the next page rather
//! than being sliced after the fact.
//!
//! In [`LayoutMode::ScaleToFit`] a measuring pass runs first and the whole
//! style sheet is shrunk so everything lands on one page.

pub mod page_break;
pub mod scale;

use serde::Serialize;

use crate::classify::{ClassifiedLine, Classifier, LineClass};
use crate::model::{Document, LayoutConfig, LayoutMode, PageConfig};
use crate::style::{FontSpec, StyleSheet, TextAlign};
use crate::text::{TextLayout, TextMeasure};
use page_break::{decide_break, overflows, BreakDecision};

/// A laid-out page: a fixed canvas holding positioned runs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Zero-based position in the document.
    pub index: usize,
    pub width: f64,
    pub height: f64,
    pub runs: Vec<Run>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// One source line, styled and positioned. Body runs may hold several
/// wrapped lines; every other class holds exactly one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub class: LineClass,
    pub font: FontSpec,
    pub align: TextAlign,
    /// Baseline of the first line.
    pub y: f64,
    /// Width of the widest line.
    pub width: f64,
    pub lines: Vec<RunLine>,
}

impl Run {
    /// All lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single drawn line. `y` is the baseline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// A measured line, not yet positioned.
#[derive(Debug, Clone)]
struct Block {
    class: LineClass,
    lines: Vec<String>,
    font: FontSpec,
    align: TextAlign,
    /// Baseline-to-baseline distance between wrapped lines.
    line_step: f64,
    /// How far the cursor moves after the block.
    advance: f64,
}

impl Block {
    /// Distance from the first baseline to the last.
    fn extent(&self) -> f64 {
        self.line_step * self.lines.len().saturating_sub(1) as f64
    }
}

/// Tracks the vertical write position on the page under construction.
struct PageCursor<'a> {
    config: &'a PageConfig,
    index: usize,
    y: f64,
    runs: Vec<Run>,
}

impl<'a> PageCursor<'a> {
    fn new(config: &'a PageConfig, index: usize) -> Self {
        Self {
            config,
            index,
            y: config.margin.top,
            runs: Vec::new(),
        }
    }

    fn finalize(self) -> Page {
        let (width, height) = self.config.dimensions();
        Page {
            index: self.index,
            width,
            height,
            runs: self.runs,
        }
    }

    fn new_page(&self) -> Self {
        PageCursor::new(self.config, self.index + 1)
    }
}

pub struct LayoutEngine {
    config: LayoutConfig,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Lay out a document into pages. Always returns at least one page.
    pub fn layout(&self, document: &Document, measure: &dyn TextMeasure) -> Vec<Page> {
        match self.config.mode {
            LayoutMode::Paginate => self.place_all(document, measure, &self.config.styles, true),
            LayoutMode::ScaleToFit => {
                let total = self.total_height(document, measure);
                let factor = scale::fit_factor(total, self.config.page.printable_bound());
                log::debug!(
                    "scale-to-fit: content height {:.1}mm, factor {:.3}",
                    total,
                    factor
                );
                let sheet = self
                    .config
                    .styles
                    .scaled(factor, self.config.min_font_size);
                self.place_all(document, measure, &sheet, false)
            }
        }
    }

    /// Sum of every line's vertical advance with the unscaled style sheet,
    /// as if the document were one endless page.
    pub fn total_height(&self, document: &Document, measure: &dyn TextMeasure) -> f64 {
        let mut classifier = Classifier::new(&document.subject_name);
        document
            .lines
            .iter()
            .map(|raw| {
                let line = classifier.classify(raw);
                self.measure_block(line, &self.config.styles, measure).advance
            })
            .sum()
    }

    fn place_all(
        &self,
        document: &Document,
        measure: &dyn TextMeasure,
        sheet: &StyleSheet,
        allow_breaks: bool,
    ) -> Vec<Page> {
        let page_config = &self.config.page;
        let mut pages: Vec<Page> = Vec::new();
        let mut cursor = PageCursor::new(page_config, 0);
        let mut classifier = Classifier::new(&document.subject_name);

        for raw in &document.lines {
            let line = classifier.classify(raw);
            let block = self.measure_block(line, sheet, measure);
            cursor = self.place_block(block, cursor, &mut pages, measure, allow_breaks);
        }

        if !allow_breaks && cursor.y > page_config.dimensions().1 - page_config.margin.bottom {
            log::warn!(
                "content still overflows the page after scaling (cursor at {:.1}mm)",
                cursor.y
            );
        }

        pages.push(cursor.finalize());
        pages
    }

    /// Style the line and, for body text, wrap it to the printable width.
    fn measure_block(
        &self,
        line: ClassifiedLine,
        sheet: &StyleSheet,
        measure: &dyn TextMeasure,
    ) -> Block {
        let style = match sheet.for_class(line.class) {
            Some(style) => style,
            None => {
                return Block {
                    class: LineClass::Blank,
                    lines: Vec::new(),
                    font: sheet.font_for(&sheet.body),
                    align: TextAlign::Left,
                    line_step: 0.0,
                    advance: sheet.blank_advance,
                }
            }
        };

        let font = sheet.font_for(style);
        let lines = if line.class == LineClass::Body {
            measure.wrap(&line.text, &font, self.config.page.printable_width())
        } else {
            vec![line.text]
        };
        let advance = if line.class == LineClass::Body {
            style.advance * lines.len() as f64
        } else {
            style.advance
        };

        Block {
            class: line.class,
            lines,
            font,
            align: style.align,
            line_step: style.advance,
            advance,
        }
    }

    /// Paginate and emit one block, returning the cursor to continue with.
    fn place_block<'a>(
        &self,
        block: Block,
        mut cursor: PageCursor<'a>,
        pages: &mut Vec<Page>,
        measure: &dyn TextMeasure,
        allow_breaks: bool,
    ) -> PageCursor<'a> {
        let bound = cursor.config.printable_bound();

        if block.class == LineClass::Blank {
            // Spacing past the bound is dropped at the page boundary.
            if !allow_breaks || cursor.y <= bound {
                cursor.y += block.advance;
            }
            return cursor;
        }

        if allow_breaks {
            if cursor.runs.is_empty() && cursor.y > bound {
                // Leading spacing alone filled the page; start the first run at the top.
                log::debug!(
                    "page {} holds only spacing past {:.1}mm, resetting to top margin",
                    cursor.index + 1,
                    bound
                );
                cursor.y = cursor.config.margin.top;
            }
            let decision = decide_break(cursor.y, block.extent(), bound, cursor.runs.is_empty());
            if decision == BreakDecision::MoveToNextPage {
                log::debug!(
                    "page {} full at {:.1}mm, starting page {}",
                    cursor.index + 1,
                    cursor.y,
                    cursor.index + 2
                );
                let next = cursor.new_page();
                pages.push(cursor.finalize());
                cursor = next;
            }
            if overflows(cursor.y, block.extent(), bound) {
                log::warn!(
                    "{} line block is taller than a page and overflows page {}",
                    block.lines.len(),
                    cursor.index + 1
                );
            }
        }

        let run = self.emit(&block, cursor.y, cursor.config, measure);
        cursor.runs.push(run);
        cursor.y += block.advance;
        cursor
    }

    /// Position every line of a block starting at baseline `y`.
    fn emit(&self, block: &Block, y: f64, page: &PageConfig, measure: &dyn TextMeasure) -> Run {
        let page_width = page.dimensions().0;
        let lines: Vec<RunLine> = block
            .lines
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let width = measure.text_width(text, &block.font);
                let x = match block.align {
                    TextAlign::Left => page.margin.left,
                    TextAlign::Center => (page_width - width) / 2.0,
                };
                RunLine {
                    text: text.clone(),
                    x,
                    y: y + block.line_step * i as f64,
                    width,
                }
            })
            .collect();

        Run {
            class: block.class,
            font: block.font,
            align: block.align,
            y,
            width: TextLayout::new().measure_widest(measure, &block.lines, &block.font),
            lines,
        }
    }
}
