//! # PDF Serializer
//!
//! Takes the laid-out pages from the layout engine and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. Resumes only need positioned text
//! in the standard Type1 fonts, so the subset of the format we emit is small:
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- Catalog
//! 2 0 obj ... endobj  <- Pages tree
//! 3.. fonts, then (content stream, page) pairs, then Info
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Layout coordinates are millimetres from the top-left corner; PDF user
//! space is points from the bottom-left, so every position is converted here.

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use crate::error::VitaeError;
use crate::font::StandardFont;
use crate::layout::{Page, Run};
use crate::model::{Metadata, PT_PER_MM};
use miniz_oxide::deflate::compress_to_vec_zlib;

#[derive(Debug, Default)]
pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Fonts in resource order: `/F0`, `/F1`, ...
    font_objects: Vec<(StandardFont, usize)>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector.
    pub fn write(&self, pages: &[Page], metadata: &Metadata) -> Result<Vec<u8>, VitaeError> {
        Self::check_geometry(pages)?;

        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
        };

        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, then page content streams and page objects
        for _ in 0..3 {
            builder.objects.push(PdfObject { data: vec![] });
        }

        self.register_fonts(&mut builder, pages);

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for page in pages {
            let content = self.build_content_stream(page, &builder);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let page_obj_id = builder.objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                page.width * PT_PER_MM,
                page.height * PT_PER_MM,
                content_obj_id,
                self.build_font_resource_dict(&builder.font_objects)
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = builder.objects.len();
        builder.objects.push(PdfObject {
            data: Self::build_info_dict(metadata).into_bytes(),
        });

        Ok(self.serialize(&builder, info_obj_id))
    }

    /// A degenerate config can produce NaN or infinite positions; refuse
    /// to serialize those rather than write a corrupt file.
    fn check_geometry(pages: &[Page]) -> Result<(), VitaeError> {
        if pages.is_empty() {
            return Err(VitaeError::Render("no pages to write".to_string()));
        }
        for page in pages {
            if !(page.width.is_finite() && page.height.is_finite()) {
                return Err(VitaeError::Render(format!(
                    "page {} has non-finite size",
                    page.index + 1
                )));
            }
            let finite = page.runs.iter().all(|run| {
                run.font.size.is_finite()
                    && run
                        .lines
                        .iter()
                        .all(|l| l.x.is_finite() && l.y.is_finite())
            });
            if !finite {
                return Err(VitaeError::Render(format!(
                    "page {} has a run with non-finite position",
                    page.index + 1
                )));
            }
        }
        Ok(())
    }

    /// Register each standard font used anywhere in the document.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[Page]) {
        let mut used: BTreeSet<StandardFont> = pages
            .iter()
            .flat_map(|p| p.runs.iter())
            .map(Self::run_font)
            .collect();

        // Always have at least Helvetica
        if used.is_empty() {
            used.insert(StandardFont::Helvetica);
        }

        for font in used {
            let obj_id = builder.objects.len();
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                 /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            builder.objects.push(PdfObject {
                data: font_dict.into_bytes(),
            });
            builder.font_objects.push((font, obj_id));
        }
    }

    fn run_font(run: &Run) -> StandardFont {
        StandardFont::resolve(run.font.family, run.font.weight)
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(&self, page: &Page, builder: &PdfBuilder) -> String {
        let mut stream = String::new();
        let page_height = page.height * PT_PER_MM;

        for run in &page.runs {
            let font_idx = self.font_index(Self::run_font(run), &builder.font_objects);
            let _ = write!(
                stream,
                "BT\n0 0 0 rg\n/F{} {:.2} Tf\n",
                font_idx, run.font.size
            );
            for line in &run.lines {
                let x = line.x * PT_PER_MM;
                let y = page_height - line.y * PT_PER_MM;
                let _ = write!(
                    stream,
                    "1 0 0 1 {:.2} {:.2} Tm\n({}) Tj\n",
                    x,
                    y,
                    Self::encode_text(&line.text)
                );
            }
            let _ = write!(stream, "ET\n");
        }

        stream
    }

    /// Encode text as a WinAnsi literal string body, escaping delimiters.
    fn encode_text(text: &str) -> String {
        let mut out = String::new();
        for ch in text.chars() {
            let b = match Self::unicode_to_winansi(ch) {
                Some(b) => b,
                None => {
                    log::warn!("character {:?} has no WinAnsi encoding, writing '?'", ch);
                    b'?'
                }
            };
            match b {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                0x20..=0x7E => out.push(b as char),
                _ => {
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out
    }

    fn build_font_resource_dict(&self, font_objects: &[(StandardFont, usize)]) -> String {
        font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up the font index (/F0, /F1, etc.) for a standard font.
    fn font_index(&self, font: StandardFont, font_objects: &[(StandardFont, usize)]) -> usize {
        font_objects
            .iter()
            .position(|(f, _)| *f == font)
            .unwrap_or(0)
    }

    fn build_info_dict(metadata: &Metadata) -> String {
        let mut info = String::from("<< ");
        let entries = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                let _ = write!(info, "/{} {} ", key, Self::info_string(value));
            }
        }
        let _ = write!(
            info,
            "/Producer (Vitae {}) /Creator (Vitae) >>",
            env!("CARGO_PKG_VERSION")
        );
        info
    }

    /// A text string for the Info dictionary. Literal strings there are read
    /// as PDFDocEncoding, so non-ASCII text goes out as UTF-16BE hex with a
    /// byte order mark.
    fn info_string(s: &str) -> String {
        if s.is_ascii() {
            return format!("({})", Self::escape_literal(s));
        }
        let mut hex = String::from("<FEFF");
        for unit in s.encode_utf16() {
            let _ = write!(hex, "{:04X}", unit);
        }
        hex.push('>');
        hex
    }

    fn escape_literal(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }

    /// Windows-1252 byte for `ch`. Latin-1 maps straight through; the
    /// 0x80..=0x9F block holds typographic punctuation.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80),
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85),
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95),
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        }
    }

    /// Header, numbered objects, xref table and trailer.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        // Binary marker
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}
