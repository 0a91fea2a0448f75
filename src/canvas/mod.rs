//! The drawing surface the flow helpers work against.
//!
//! A [`Canvas`] owns page geometry, a cursor, the current font style and text paint, and
//! a handful of primitives: measuring text, drawing a wrapped cell, placing an image,
//! and starting a new page. Coordinates are top-down: `(0, 0)` is the top-left corner of
//! the page and `y` grows towards the bottom edge.
//!
//! [`DocumentCanvas`] implements it on top of this crate's [`Document`](crate::Document).

mod document;
#[cfg(test)]
pub(crate) mod testing;

pub use document::*;

use crate::colour::Colour;
use crate::image::Image;
use crate::layout::Margins;
use crate::rect::Rect;
use crate::units::Pt;

/// Weight of the font text is drawn in
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
}

/// How text drawn by [`Canvas::multi_cell`] is painted. Invisible text still takes up
/// space and moves the cursor, so it can be used to measure a layout before committing it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TextPaint {
    Visible(Colour),
    Invisible,
}

/// Whether a cell is drawn with a frame around it
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Border {
    #[default]
    None,
    All,
}

/// Horizontal alignment of the lines in a cell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    #[default]
    Justify,
}

pub trait Canvas {
    /// Width and height of the current page
    fn page_size(&self) -> (Pt, Pt);

    fn margins(&self) -> &Margins;

    /// The current drawing position
    fn cursor(&self) -> (Pt, Pt);

    fn set_cursor(&mut self, x: Pt, y: Pt);

    /// Start a new page with the same size and margins as the current one, moving the
    /// cursor to the top-left corner of its content area
    fn add_page(&mut self);

    fn font_style(&self) -> FontStyle;

    fn set_font_style(&mut self, style: FontStyle);

    fn text_paint(&self) -> TextPaint;

    fn set_text_paint(&mut self, paint: TextPaint);

    /// Rendered width of `text` in the current font
    fn width_of_text(&self, text: &str) -> Pt;

    /// Draw `text` wrapped into lines of `line_height` inside a cell `width` wide, starting
    /// at the cursor. A width of zero extends the cell to the right margin. Afterwards the
    /// cursor sits at the left margin, just below the cell, even if that is past the
    /// bottom edge of the page.
    fn multi_cell(&mut self, width: Pt, line_height: Pt, text: &str, border: Border, align: TextAlign);

    /// Draw an image scaled into `position`, which is given top-down
    fn draw_image(&mut self, image: Image, position: Rect);

    /// Vertical space available on a page
    fn usable_height(&self) -> Pt {
        let margins = self.margins();
        self.page_size().1 - margins.top - margins.bottom
    }

    /// Horizontal space available for full-width content. Measured as the page width
    /// less twice the left margin.
    fn usable_width(&self) -> Pt {
        self.page_size().0 - self.margins().left * 2.0
    }

    /// The y coordinate of the bottom margin line; content that ends below it overflows
    fn bottom_limit(&self) -> Pt {
        self.page_size().1 - self.margins().bottom
    }
}
