//! # Vitae
//!
//! A page-native resume typesetter.
//!
//! A resume arrives as Markdown-like text: a `## Name` title, a contact
//! line, `## Section` headings, `### Role @ Company` entries, bullets, and
//! paragraphs. Vitae runs one forward pass over those lines, classifies
//! each one, and places it *into* fixed A4 pages, starting a new page
//! whenever the next block no longer fits.
//!
//! ## Architecture
//!
//! ```text
//! Resume JSON ──[compose]──┐
//!                          ↓
//!            Markdown lines + subject name
//!                          ↓
//!   [classify]  strip markup, title/contact/heading/... state machine
//!                          ↓
//!   [layout]    measure (text), paginate, emit positioned runs
//!                          ↓
//!   [pdf]       serialize pages to PDF bytes
//! ```

pub mod classify;
pub mod compose;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod style;
pub mod text;

use std::path::Path;

pub use error::{Result, VitaeError};
use font::FontContext;
use layout::{LayoutEngine, Page};
use model::{Document, LayoutConfig, Metadata};
use pdf::PdfWriter;

/// Lay out raw lines with the default A4 configuration and Helvetica
/// metrics. Pure; always returns at least one page.
pub fn layout<S: AsRef<str>>(lines: &[S], subject_name: &str) -> Vec<Page> {
    let document = Document::new(lines, subject_name);
    LayoutEngine::default().layout(&document, &FontContext::new())
}

/// Render a document to PDF bytes.
///
/// This is the primary entry point. Either the whole document renders or
/// an error is returned; there is no partial output.
pub fn render(document: &Document, config: &LayoutConfig) -> Result<Vec<u8>> {
    config.validate()?;
    let engine = LayoutEngine::new(config.clone());
    let pages = engine.layout(document, &FontContext::new());
    log::debug!(
        "laid out {} lines onto {} page(s)",
        document.lines.len(),
        pages.len()
    );
    PdfWriter::new().write(&pages, &pdf_metadata(document))
}

/// Render Markdown-like resume text to PDF bytes with the default config.
pub fn render_markdown(text: &str, subject_name: &str) -> Result<Vec<u8>> {
    render(
        &Document::from_markdown(text, subject_name),
        &LayoutConfig::default(),
    )
}

/// Render a document and save it to `path`. Returns the number of bytes
/// written.
pub fn render_to_file(
    document: &Document,
    config: &LayoutConfig,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let bytes = render(document, config)?;
    std::fs::write(path.as_ref(), &bytes)?;
    log::info!("wrote {} bytes to {}", bytes.len(), path.as_ref().display());
    Ok(bytes.len())
}

/// The subject is the author unless the document says otherwise.
fn pdf_metadata(document: &Document) -> Metadata {
    let mut metadata = document.metadata.clone();
    if metadata.author.is_none() && !document.subject_name.is_empty() {
        metadata.author = Some(document.subject_name.clone());
    }
    metadata
}
