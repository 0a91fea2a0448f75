//! Page-flow layout: content that is placed at the cursor and moves on to a new page
//! when it would cross the bottom margin.
//!
//! Every helper works against any [`Canvas`](crate::canvas::Canvas):
//!
//! - [`render_image`](crate::flow::render_image) places an image, either sized as a share
//!   of the usable width and aligned, or at explicit coordinates
//! - [`cell_breaks_page`](crate::flow::cell_breaks_page) and
//!   [`row_breaks_page`](crate::flow::row_breaks_page) predict, without drawing, whether
//!   wrapped text would overflow the page
//! - [`render_row`](crate::flow::render_row) draws one table row with uniform borders
//! - [`render_table`](crate::flow::render_table) draws a whole table, repeating the header
//!   row at the top of every page it spills onto
//! - [`smart_multi_cell`](crate::flow::smart_multi_cell) draws a wrapped cell, breaking
//!   the page first if it wouldn't fit
//!
//! # Example
//!
//! ```
//! use pdf_flow::{Font, Pt};
//! use pdf_flow::canvas::DocumentCanvas;
//! use pdf_flow::flow::{self, TableData, TableOptions};
//!
//! let regular = include_bytes!("../../assets/DejaVuSans.ttf");
//! let regular = Font::load(regular.to_vec()).expect("can load font");
//! let mut canvas = DocumentCanvas::with_defaults(regular, None);
//!
//! let mut data = TableData::new(["item", "qty"]);
//! data.push_row(["apples", "3"]).expect("row matches columns");
//! data.push_row(["pears", "12"]).expect("row matches columns");
//!
//! let options = TableOptions::default().column_percents(vec![70.0, 30.0]);
//! flow::render_table(&mut canvas, &data, &options).expect("valid table");
//!
//! let mut out: Vec<u8> = Vec::new();
//! canvas.write(&mut out).expect("can write pdf");
//! ```

mod breaks;
mod cell;
mod image;
mod table;

pub use self::image::*;
pub use breaks::*;
pub use cell::*;
pub use table::*;

use crate::canvas::Canvas;
use crate::units::Pt;

/// Horizontal placement of a block within the page margins
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

impl Align {
    /// Parse a one-letter alignment token: `L`, `C` or `R`. Anything else centres.
    pub fn from_token(token: &str) -> Align {
        match token.trim().to_ascii_uppercase().as_str() {
            "L" => Align::Left,
            "R" => Align::Right,
            _ => Align::Center,
        }
    }

    /// The x coordinate of the left edge of a block `width` wide
    pub fn x_for<C: Canvas + ?Sized>(self, canvas: &C, width: Pt) -> Pt {
        let margins = canvas.margins();
        match self {
            Align::Left => margins.left,
            Align::Right => canvas.page_size().0 - margins.right - width,
            Align::Center => margins.left + (canvas.usable_width() - width) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::testing::RecordingCanvas;

    #[test]
    fn unknown_tokens_centre() {
        assert_eq!(Align::from_token("l"), Align::Left);
        assert_eq!(Align::from_token("R"), Align::Right);
        assert_eq!(Align::from_token("C"), Align::Center);
        assert_eq!(Align::from_token("justify"), Align::Center);
    }

    #[test]
    fn blocks_align_within_the_margins() {
        let canvas = RecordingCanvas::a4();
        assert_eq!(Align::Left.x_for(&canvas, Pt(85.0)), Pt(20.0));
        assert_eq!(Align::Right.x_for(&canvas, Pt(85.0)), Pt(105.0));
        assert_eq!(Align::Center.x_for(&canvas, Pt(85.0)), Pt(62.5));
    }
}
