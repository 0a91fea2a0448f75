#![allow(dead_code)]

use pdf_flow::canvas::{Border, Canvas, DocumentCanvas, FontStyle, TextAlign, TextPaint};
use pdf_flow::layout::{wrap_text, Margins};
use pdf_flow::{colours, Font, Image, Mm, Pt, Rect};

pub fn fonts() -> (Font, Font) {
    let regular = Font::load(include_bytes!("../../assets/DejaVuSans.ttf").to_vec())
        .expect("can load regular font");
    let bold = Font::load(include_bytes!("../../assets/DejaVuSans-Bold.ttf").to_vec())
        .expect("can load bold font");
    (regular, bold)
}

pub fn document_canvas() -> DocumentCanvas {
    let (regular, bold) = fonts();
    DocumentCanvas::with_defaults(regular, Some(bold))
}

/// A drawn cell, as seen by [Sketch]
#[derive(Debug, Clone, PartialEq)]
pub struct Drawn {
    pub page: usize,
    pub x: Pt,
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
    pub text: String,
    pub border: Border,
    pub style: FontStyle,
    pub visible: bool,
}

/// An A4 page in millimetres with 20mm margins and glyphs 2mm wide, that remembers the
/// cells it draws and the pages it starts
pub struct Sketch {
    pub margins: Margins,
    pub cursor: (Pt, Pt),
    pub style: FontStyle,
    pub paint: TextPaint,
    pub page: usize,
    pub cells: Vec<Drawn>,
    pub images: Vec<(usize, Rect)>,
}

impl Default for Sketch {
    fn default() -> Self {
        Sketch {
            margins: Margins::all(Pt(20.0)),
            cursor: (Pt(20.0), Pt(20.0)),
            style: FontStyle::Regular,
            paint: TextPaint::Visible(colours::BLACK),
            page: 0,
            cells: Vec::new(),
            images: Vec::new(),
        }
    }
}

impl Canvas for Sketch {
    fn page_size(&self) -> (Pt, Pt) {
        (Pt(210.0), Pt(297.0))
    }

    fn margins(&self) -> &Margins {
        &self.margins
    }

    fn cursor(&self) -> (Pt, Pt) {
        self.cursor
    }

    fn set_cursor(&mut self, x: Pt, y: Pt) {
        self.cursor = (x, y);
    }

    fn add_page(&mut self) {
        self.page += 1;
        self.cursor = (self.margins.left, self.margins.top);
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
        Pt(2.0) * text.chars().count() as f32
    }

    fn multi_cell(&mut self, width: Pt, line_height: Pt, text: &str, border: Border, _align: TextAlign) {
        let (x, y) = self.cursor;
        let width = if width <= Pt(0.0) {
            Pt(210.0) - self.margins.right - x
        } else {
            width
        };
        let lines = wrap_text(text, width, |s| self.width_of_text(s)).len();
        let height = line_height * lines as f32;
        self.cells.push(Drawn {
            page: self.page,
            x,
            y,
            width,
            height,
            text: text.to_string(),
            border,
            style: self.style,
            visible: matches!(self.paint, TextPaint::Visible(_)),
        });
        self.cursor = (self.margins.left, y + height);
    }

    fn draw_image(&mut self, _image: Image, position: Rect) {
        self.images.push((self.page, position));
    }
}

/// Convert millimetres to points for comparisons against a [DocumentCanvas]
pub fn mm(value: f32) -> Pt {
    Mm(value).into()
}
