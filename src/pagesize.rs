//! Paper formats for [`DocumentCanvas`](crate::canvas::DocumentCanvas) pages, as
//! `(width, height)` in points.
//!
//! ```
//! use pdf_flow::pagesize::{self, A4};
//!
//! let (width, height) = pagesize::landscape(A4);
//! assert!(width > height);
//! ```

use crate::units::*;

pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

// iso a-series, from millimetres
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// The same paper turned on its side, so that it is wider than it is tall
pub fn landscape(size: PageSize) -> PageSize {
    if size.0 >= size.1 {
        size
    } else {
        (size.1, size.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_is_210_by_297_millimetres() {
        let width: Mm = A4.0.into();
        let height: Mm = A4.1.into();
        assert!((width.0 - 210.0).abs() < 1e-3);
        assert!((height.0 - 297.0).abs() < 1e-3);
        assert_eq!(landscape(landscape(A4)), (A4.1, A4.0));
    }
}
