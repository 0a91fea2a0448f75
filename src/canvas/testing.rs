use super::{Border, Canvas, FontStyle, TextAlign, TextPaint};
use crate::colour::colours;
use crate::image::Image;
use crate::layout::{wrap_text, Margins};
use crate::rect::Rect;
use crate::units::Pt;

/// Something a [RecordingCanvas] was asked to do
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    AddPage,
    Cell {
        page: usize,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        text: String,
        border: Border,
        style: FontStyle,
        paint: TextPaint,
    },
    Image {
        page: usize,
        position: Rect,
    },
}

/// A canvas with fixed-width glyphs that records every primitive it is asked to draw
pub(crate) struct RecordingCanvas {
    pub size: (Pt, Pt),
    pub margins: Margins,
    pub cursor: (Pt, Pt),
    pub style: FontStyle,
    pub paint: TextPaint,
    pub char_width: Pt,
    pub bold_char_width: Pt,
    pub page: usize,
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    /// A 210 x 297 page with margins of 20 all around, 2 units per character in both
    /// faces
    pub fn a4() -> RecordingCanvas {
        RecordingCanvas {
            size: (Pt(210.0), Pt(297.0)),
            margins: Margins::all(Pt(20.0)),
            cursor: (Pt(20.0), Pt(20.0)),
            style: FontStyle::Regular,
            paint: TextPaint::Visible(colours::BLACK),
            char_width: Pt(2.0),
            bold_char_width: Pt(2.0),
            page: 0,
            ops: Vec::new(),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter().filter(|op| matches!(op, Op::Cell { .. }))
    }

    pub fn page_breaks(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::AddPage).count()
    }
}

impl Canvas for RecordingCanvas {
    fn page_size(&self) -> (Pt, Pt) {
        self.size
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
        self.ops.push(Op::AddPage);
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
        let char_width = match self.style {
            FontStyle::Regular => self.char_width,
            FontStyle::Bold => self.bold_char_width,
        };
        char_width * text.chars().count() as f32
    }

    fn multi_cell(&mut self, width: Pt, line_height: Pt, text: &str, border: Border, _align: TextAlign) {
        let (x, y) = self.cursor;
        let width = if width <= Pt(0.0) {
            self.size.0 - self.margins.right - x
        } else {
            width
        };
        let lines = wrap_text(text, width, |s| self.width_of_text(s));
        let height = line_height * lines.len() as f32;
        self.ops.push(Op::Cell {
            page: self.page,
            x,
            y,
            width,
            height,
            text: text.to_string(),
            border,
            style: self.style,
            paint: self.paint,
        });
        self.cursor = (self.margins.left, y + height);
    }

    fn draw_image(&mut self, _image: Image, position: Rect) {
        self.ops.push(Op::Image {
            page: self.page,
            position,
        });
    }
}
