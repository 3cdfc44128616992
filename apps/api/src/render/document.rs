//! Block model consumed by the PDF writer.

use crate::render::metrics::{Font, Word};

/// Page size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

pub const US_LETTER: PageSize = PageSize {
    width: 612.0,
    height: 792.0,
};

pub const INCH: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A run of text in one font.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub font: Font,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            font: Font::Helvetica,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            font: Font::HelveticaBold,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub spans: Vec<Span>,
    pub size: f64,
    pub leading: f64,
    pub align: Align,
    /// Extra space below the paragraph.
    pub space_after: f64,
}

impl Paragraph {
    pub fn new(spans: Vec<Span>, size: f64) -> Self {
        Paragraph {
            spans,
            size,
            leading: size * 1.2,
            align: Align::Left,
            space_after: 0.0,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn space_after(mut self, points: f64) -> Self {
        self.space_after = points;
        self
    }

    /// The paragraph split into words, each keeping the font of its span.
    pub fn words(&self) -> Vec<Word> {
        self.spans
            .iter()
            .flat_map(|span| {
                span.text.split_whitespace().map(move |w| Word {
                    text: w.to_string(),
                    font: span.font,
                })
            })
            .collect()
    }
}

/// A grid of single-line cells. The first row is drawn as a header.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
    pub column_widths: Vec<f64>,
    pub size: f64,
    pub padding: f64,
    /// Extra bottom padding on the header row.
    pub header_bottom_padding: f64,
    /// Grey level (0 black .. 1 white) of the header background.
    pub header_fill: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Spacer(f64),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: PageSize,
    pub margin: f64,
    pub blocks: Vec<Block>,
}
