use super::{Border, Canvas, FontStyle, TextAlign, TextPaint};
use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::font::Font;
use crate::image::Image;
use crate::info::Info;
use crate::layout::{align_line, width_of_text, wrap_text, Margins};
use crate::page::{ImageLayout, Page, SpanFont, SpanLayout, StrokeLayout};
use crate::pagesize::{self, PageSize};
use crate::rect::Rect;
use crate::units::{Mm, Pt};
use crate::PDFError;
use id_arena::Id;
use std::io::Write;

/// A [Canvas] that draws into a [Document], one page after another.
///
/// The canvas always has a current page (the last one added) and a top-down cursor on
/// it. Text is set in a regular font and, optionally, a bold one; without a bold font,
/// bold text falls back to the regular face.
pub struct DocumentCanvas {
    document: Document,
    page_size: PageSize,
    margins: Margins,
    page: Id<Page>,
    cursor: (Pt, Pt),
    regular: Id<Font>,
    bold: Option<Id<Font>>,
    font_size: Pt,
    style: FontStyle,
    paint: TextPaint,
    /// Horizontal space kept clear between a cell's edges and its text
    pub cell_padding: Pt,
    /// Stroke width of cell borders
    pub border_width: Pt,
    pub border_colour: Colour,
}

impl DocumentCanvas {
    /// Start a document with a single empty page, the cursor at the top-left corner of
    /// its content area
    pub fn new(
        page_size: PageSize,
        margins: Margins,
        regular: Font,
        bold: Option<Font>,
        font_size: Pt,
    ) -> DocumentCanvas {
        let mut document = Document::default();
        let regular = document.add_font(regular);
        let bold = bold.map(|font| document.add_font(font));
        let page = document.add_page(Page::new(page_size, Some(margins.clone())));
        let cursor = (margins.left, margins.top);

        DocumentCanvas {
            document,
            page_size,
            margins,
            page,
            cursor,
            regular,
            bold,
            font_size,
            style: FontStyle::Regular,
            paint: TextPaint::Visible(colours::BLACK),
            cell_padding: Mm(1.0).into(),
            border_width: Pt(0.5),
            border_colour: colours::BLACK,
        }
    }

    /// An A4 canvas with 20mm margins and 10pt text
    pub fn with_defaults(regular: Font, bold: Option<Font>) -> DocumentCanvas {
        DocumentCanvas::new(
            pagesize::A4,
            Margins::all(Mm(20.0)),
            regular,
            bold,
            Pt(10.0),
        )
    }

    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    pub fn font_size(&self) -> Pt {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: Pt) {
        self.font_size = size;
    }

    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    /// The page currently being drawn on
    pub fn current_page(&self) -> &Page {
        &self.document.pages[self.page]
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Render the whole document as PDF into `w`
    pub fn write<W: Write>(self, w: W) -> Result<(), PDFError> {
        self.document.write(w)
    }

    fn current_font(&self) -> Id<Font> {
        match self.style {
            FontStyle::Bold => self.bold.unwrap_or(self.regular),
            FontStyle::Regular => self.regular,
        }
    }

    fn clamp_to_page(&self, x: Pt, y: Pt) -> (Pt, Pt) {
        (
            x.clamp(Pt(0.0), self.page_size.0),
            y.clamp(Pt(0.0), self.page_size.1),
        )
    }
}

impl Canvas for DocumentCanvas {
    fn page_size(&self) -> (Pt, Pt) {
        self.page_size
    }

    fn margins(&self) -> &Margins {
        &self.margins
    }

    fn cursor(&self) -> (Pt, Pt) {
        self.cursor
    }

    fn set_cursor(&mut self, x: Pt, y: Pt) {
        self.cursor = self.clamp_to_page(x, y);
    }

    fn add_page(&mut self) {
        self.page = self
            .document
            .add_page(Page::new(self.page_size, Some(self.margins.clone())));
        self.cursor = (self.margins.left, self.margins.top);
        log::trace!("started page {}", self.document.page_count());
    }

    fn font_style(&self) -> FontStyle {
        self.style
    }

    fn set_font_style(&mut self, style: FontStyle) {
        self.style = style;
    }

    fn text_paint(&self) -> TextPaint {
        self.paint
    }

    fn set_text_paint(&mut self, paint: TextPaint) {
        self.paint = paint;
    }

    fn width_of_text(&self, text: &str) -> Pt {
        width_of_text(text, &self.document.fonts[self.current_font()], self.font_size)
    }

    fn multi_cell(&mut self, width: Pt, line_height: Pt, text: &str, border: Border, align: TextAlign) {
        let (x, top) = self.cursor;
        let width = if width <= Pt(0.0) {
            (self.page_size.0 - self.margins.right - x).max(Pt(0.0))
        } else {
            width
        };
        let inner = (width - self.cell_padding * 2.0).max(Pt(0.0));

        let font_id = self.current_font();
        let font = &self.document.fonts[font_id];
        let size = self.font_size;
        let measure = |s: &str| width_of_text(s, font, size);

        let lines = wrap_text(text, inner, measure);
        let height = line_height * lines.len().max(1) as f32;

        let mut spans: Vec<SpanLayout> = Vec::new();
        if let TextPaint::Visible(colour) = self.paint {
            // centre the glyph box of each line within its line box
            let baseline_drop = (line_height + font.ascent(size) + font.descent(size)) / 2.0;
            for (i, line) in lines.iter().enumerate() {
                let baseline = top + line_height * i as f32 + baseline_drop;
                let last_line = i + 1 == lines.len();
                for (piece, dx) in align_line(line, inner, align, last_line, measure) {
                    spans.push(SpanLayout {
                        text: piece,
                        font: SpanFont { id: font_id, size },
                        colour,
                        coords: (x + self.cell_padding + dx, self.page_size.1 - baseline),
                    });
                }
            }
        }

        let page = &mut self.document.pages[self.page];
        page.add_spans(spans);
        if border == Border::All {
            page.add_stroke(StrokeLayout {
                rect: Rect::from_origin(x, top, width, height).flipped(self.page_size.1),
                colour: self.border_colour,
                line_width: self.border_width,
            });
        }

        // not clamped, so callers can measure cells that run off the page
        self.cursor = (self.margins.left, top + height);
    }

    fn draw_image(&mut self, image: Image, position: Rect) {
        let image_id = self.document.add_image(image);
        self.document.pages[self.page].add_image(ImageLayout {
            image_id,
            position: position.flipped(self.page_size.1),
        });
    }
}
