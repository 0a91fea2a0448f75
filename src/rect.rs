use crate::units::*;

/// A rectangle, specified by two opposite corners.
///
/// Whether `y1` is the top or the bottom edge depends on who is asking: the
/// [`Canvas`](crate::canvas::Canvas) works top-down (y grows towards the bottom of the
/// page), while [`Page`](crate::Page) contents are stored in PDF space (y grows upward).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first corner.
    pub x1: Pt,
    /// The y-coordinate of the first corner.
    pub y1: Pt,
    /// The x-coordinate of the second corner.
    pub x2: Pt,
    /// The y-coordinate of the second corner.
    pub y2: Pt,
}

impl Rect {
    /// Build a rectangle from its first corner and its size
    pub fn from_origin(x: Pt, y: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    /// Flip a top-down rectangle into PDF space for a page of the given height,
    /// so that `y1` becomes the bottom edge.
    pub fn flipped(&self, page_height: Pt) -> Rect {
        Rect {
            x1: self.x1,
            y1: page_height - self.y2,
            x2: self.x2,
            y2: page_height - self.y1,
        }
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_into_pdf_space() {
        let top_down = Rect::from_origin(Pt(10.0), Pt(20.0), Pt(30.0), Pt(40.0));
        let flipped = top_down.flipped(Pt(100.0));
        assert_eq!(flipped.y1, Pt(40.0));
        assert_eq!(flipped.y2, Pt(80.0));
        assert_eq!(flipped.width(), Pt(30.0));
        assert_eq!(flipped.height(), Pt(40.0));
    }
}
