//! Page-flow layout on top of a small PDF document model.
//!
//! A [`canvas::DocumentCanvas`] keeps a cursor on the current page of a [`Document`];
//! the helpers in [`flow`] place images, wrapped cells and whole tables at that cursor,
//! starting new pages whenever content would cross the bottom margin.

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (most text) on pages
pub mod layout;

pub mod canvas;

pub mod flow;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
