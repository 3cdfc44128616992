//! Lays out a `Document` and serializes it through `lopdf`.
//!
//! Output is a pure function of the document: no info dictionary, no
//! document id, and object numbers follow insertion order.

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, Stream, StringFormat};

use crate::render::document::{Align, Block, Document, Paragraph, Table};
use crate::render::metrics::{line_width, wrap_words, Font, Word};

const FONTS: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

/// Maps text onto what the standard fonts can show with WinAnsiEncoding.
///
/// The rupee sign has no glyph in the standard fonts and becomes "Rs.";
/// curly quotes and dashes fold to ASCII; other characters outside
/// Latin-1 become '?'.
pub fn win_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{20B9}' => out.push_str("Rs."),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Single-byte string operand. Input has been through `win_ansi`, so every
/// char fits in one byte.
fn text_operand(text: &str) -> Object {
    let bytes = text.chars().map(|c| u32::from(c) as u8).collect();
    Object::String(bytes, StringFormat::Literal)
}

/// Coordinates rounded to hundredths of a point.
fn real(value: f64) -> Object {
    Object::from((value * 100.0).round() / 100.0)
}

fn op(operator: &str, operands: Vec<Object>) -> Operation {
    Operation::new(operator, operands)
}

struct Pager<'a> {
    doc: &'a Document,
    pages: Vec<Vec<Operation>>,
    content: Vec<Operation>,
    y: f64,
}

impl<'a> Pager<'a> {
    fn new(doc: &'a Document) -> Self {
        Pager {
            doc,
            pages: Vec::new(),
            content: Vec::new(),
            y: doc.page.height - doc.margin,
        }
    }

    fn content_width(&self) -> f64 {
        self.doc.page.width - 2.0 * self.doc.margin
    }

    /// Starts a new page when `height` does not fit above the bottom margin.
    fn ensure_space(&mut self, height: f64) {
        if self.y - height < self.doc.margin && !self.content.is_empty() {
            self.pages.push(std::mem::take(&mut self.content));
            self.y = self.doc.page.height - self.doc.margin;
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        let words: Vec<Word> = paragraph
            .words()
            .into_iter()
            .map(|w| Word {
                text: win_ansi(&w.text),
                font: w.font,
            })
            .collect();
        let size = paragraph.size;

        for line in wrap_words(&words, size, self.content_width()) {
            self.ensure_space(paragraph.leading);
            let x = match paragraph.align {
                Align::Left => self.doc.margin,
                Align::Center => {
                    self.doc.margin + (self.content_width() - line_width(&line, size)) / 2.0
                }
            };
            let baseline = self.y - size;
            self.text_line(&line, size, x, baseline);
            self.y -= paragraph.leading;
        }
        self.y -= paragraph.space_after;
    }

    fn text_line(&mut self, line: &[Word], size: f64, x: f64, baseline: f64) {
        self.content.push(op("BT", vec![]));
        self.content.push(op("Td", vec![real(x), real(baseline)]));
        let mut current_font: Option<Font> = None;
        for (i, word) in line.iter().enumerate() {
            if current_font != Some(word.font) {
                self.content.push(op(
                    "Tf",
                    vec![Object::Name(word.font.resource().into()), real(size)],
                ));
                current_font = Some(word.font);
            }
            let text = if i == 0 {
                word.text.clone()
            } else {
                format!(" {}", word.text)
            };
            self.content.push(op("Tj", vec![text_operand(&text)]));
        }
        self.content.push(op("ET", vec![]));
    }

    fn rect(x: f64, y: f64, width: f64, height: f64) -> Operation {
        op("re", vec![real(x), real(y), real(width), real(height)])
    }

    fn table(&mut self, table: &Table) {
        let total_width: f64 = table.column_widths.iter().sum();
        let left = self.doc.margin + (self.content_width() - total_width).max(0.0) / 2.0;

        for (row_index, row) in table.rows.iter().enumerate() {
            let is_header = row_index == 0;
            let extra = if is_header { table.header_bottom_padding } else { 0.0 };
            let height = table.size + 2.0 * table.padding + extra;
            self.ensure_space(height);
            let bottom = self.y - height;

            if is_header {
                self.content.push(op("g", vec![real(table.header_fill)]));
                self.content.push(Self::rect(left, bottom, total_width, height));
                self.content.push(op("f", vec![]));
                self.content.push(op("g", vec![real(0.0)]));
            }

            let font = if is_header {
                Font::HelveticaBold
            } else {
                Font::Helvetica
            };
            let mut x = left;
            for (cell, width) in row.iter().zip(&table.column_widths) {
                let word = Word {
                    text: win_ansi(cell),
                    font,
                };
                // Baseline sits one padding plus the descent above the cell bottom.
                let baseline = bottom + extra + table.padding + table.size * 0.2;
                self.text_line(std::slice::from_ref(&word), table.size, x + table.padding, baseline);
                self.content.push(op("w", vec![real(1.0)]));
                self.content.push(Self::rect(x, bottom, *width, height));
                self.content.push(op("S", vec![]));
                x += width;
            }
            self.y = bottom;
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.content.is_empty() || self.pages.is_empty() {
            self.pages.push(self.content);
        }
        self.pages
    }
}

/// Lays out the document and serializes it to PDF bytes.
pub fn render(doc: &Document) -> Result<Vec<u8>> {
    let mut pager = Pager::new(doc);
    for block in &doc.blocks {
        match block {
            Block::Paragraph(p) => pager.paragraph(p),
            Block::Spacer(height) => pager.y -= height,
            Block::Table(t) => pager.table(t),
        }
    }
    let pages = pager.finish();

    let mut pdf = lopdf::Document::with_version("1.4");
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for font in FONTS {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let bytes = Content { operations }
            .encode()
            .context("encoding page content stream")?;
        let content_id = pdf.add_object(Stream::new(Dictionary::new(), bytes));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![real(0.0), real(0.0), real(doc.page.width), real(doc.page.height)],
        }),
    );
    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    pdf.save_to(&mut out).context("serializing PDF")?;
    Ok(out)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::render::document::{Span, US_LETTER};

    fn doc(blocks: Vec<Block>) -> Document {
        Document {
            page: US_LETTER,
            margin: 72.0,
            blocks,
        }
    }

    /// Every page's content stream, decoded back into operations.
    pub(crate) fn decoded_pages(bytes: &[u8]) -> Vec<Vec<Operation>> {
        let pdf = lopdf::Document::load_mem(bytes).unwrap();
        pdf.get_pages()
            .values()
            .map(|page_id| {
                let data = pdf.get_page_content(*page_id).unwrap();
                Content::decode(&data).unwrap().operations
            })
            .collect()
    }

    /// Text shown by `Tj` operators, one entry per operator.
    pub(crate) fn shown_text(bytes: &[u8]) -> Vec<String> {
        decoded_pages(bytes)
            .into_iter()
            .flatten()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(text, _)) => Some(text.iter().map(|b| *b as char).collect::<String>()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_win_ansi_substitutions() {
        assert_eq!(win_ansi("₹15000.00/Month"), "Rs.15000.00/Month");
        assert_eq!(win_ansi("it’s – ok"), "it's - ok");
        assert_eq!(win_ansi("café"), "café");
        assert_eq!(win_ansi("日本"), "??");
    }

    #[test]
    fn test_latin1_text_survives_as_single_bytes() {
        let bytes = render(&doc(vec![Block::Paragraph(Paragraph::new(
            vec![Span::plain("café (a)\\b")],
            10.0,
        ))]))
        .unwrap();
        assert_eq!(shown_text(&bytes), vec!["café", " (a)\\b"]);
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let bytes = render(&doc(Vec::new())).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert_eq!(decoded_pages(&bytes).len(), 1);
    }

    #[test]
    fn test_long_content_breaks_pages() {
        let blocks = (0..80)
            .map(|i| Block::Paragraph(Paragraph::new(vec![Span::plain(format!("Line {i}"))], 12.0)))
            .collect();
        let bytes = render(&doc(blocks)).unwrap();
        let pages = decoded_pages(&bytes);
        assert_eq!(pages.len(), 2);
        assert_eq!(shown_text(&bytes).len(), 80);
    }

    #[test]
    fn test_render_is_byte_identical() {
        let document = doc(vec![
            Block::Paragraph(Paragraph::new(vec![Span::bold("Hello")], 10.0)),
            Block::Spacer(12.0),
            Block::Paragraph(Paragraph::new(vec![Span::plain("world")], 10.0).centered()),
        ]);
        assert_eq!(render(&document).unwrap(), render(&document).unwrap());
    }

    #[test]
    fn test_table_draws_header_fill_and_grid() {
        let table = Table {
            rows: vec![
                vec!["Start Date".to_string(), "June 01, 2026".to_string()],
                vec!["Location".to_string(), "Remote".to_string()],
            ],
            column_widths: vec![144.0, 216.0],
            size: 12.0,
            padding: 6.0,
            header_bottom_padding: 12.0,
            header_fill: 0.83,
        };
        let bytes = render(&doc(vec![Block::Table(table)])).unwrap();
        let ops: Vec<Operation> = decoded_pages(&bytes).into_iter().flatten().collect();

        assert_eq!(ops.iter().filter(|op| op.operator == "f").count(), 1);
        assert_eq!(ops.iter().filter(|op| op.operator == "S").count(), 4);
        let bold_header = ops.iter().any(|op| {
            op.operator == "Tf"
                && matches!(op.operands.first(), Some(Object::Name(name)) if name.as_slice() == b"F2")
        });
        assert!(bold_header);
        assert_eq!(
            shown_text(&bytes),
            vec!["Start Date", "June 01, 2026", "Location", "Remote"]
        );
    }
}
