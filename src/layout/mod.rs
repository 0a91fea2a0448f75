//! Text measurement and line breaking.
//!
//! These are the building blocks the [`DocumentCanvas`](crate::canvas::DocumentCanvas)
//! uses to draw wrapped cells:
//!
//! - [`width_of_text`](crate::layout::width_of_text) measures a string in a given font and size
//! - [`wrap_text`](crate::layout::wrap_text) breaks text into lines that fit a width
//! - [`align_line`](crate::layout::align_line) positions the words of a line (left, right,
//!   centred or justified)
//!
//! [`Margins`](crate::layout::Margins) describe the content area of every page.
//!
//! # Example
//!
//! ```
//! use pdf_flow::{Pt, layout::wrap_text};
//!
//! // a fixed-width "font": every character is 5pt wide
//! let lines = wrap_text("page flow layout", Pt(50.0), |s| Pt(s.len() as f32 * 5.0));
//! assert_eq!(lines, vec!["page flow", "layout"]);
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;
