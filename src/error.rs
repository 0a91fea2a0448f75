use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error("page is missing from the document")]
    /// A page listed in the page order is no longer in the page arena
    PageMissing,

    #[error(transparent)]
    /// Caller-supplied layout configuration is structurally invalid
    Validation(#[from] ValidationError),

    #[error(transparent)]
    /// The requested content cannot be placed on the page
    Layout(#[from] LayoutError),
}

/// Configuration passed to a flow operation is invalid. Raised before anything is drawn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("width percentage must not be negative, got {0}")]
    NegativePercentage(f32),

    #[error("width percentage must be a finite number")]
    NonFinitePercentage,

    #[error("column width percentages must sum to 100, got {0}")]
    ColumnPercentagesSum(f32),

    #[error("expected {expected} column widths, got {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("expected {expected} table labels, got {found}")]
    LabelCount { expected: usize, found: usize },

    #[error("table has no column named `{0}`")]
    UnknownColumn(String),

    #[error("row has {found} values but the table has {expected} columns")]
    RowLength { expected: usize, found: usize },
}

/// Content cannot be placed within the page margins
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("image does not fit on the page: {}", describe_overflow(.overflows_right, .overflows_bottom))]
    ImageOutOfBounds {
        overflows_right: bool,
        overflows_bottom: bool,
    },

    #[error("image is {height} tall and does not fit below the top margin of a new page; reduce the width percentage or the page break offset")]
    ImageTooTall { height: f32 },
}

fn describe_overflow(right: &bool, bottom: &bool) -> &'static str {
    match (*right, *bottom) {
        (true, true) => "its width exceeds the right margin and its height exceeds the bottom margin",
        (true, false) => "its width exceeds the right margin",
        (false, true) => "its height exceeds the bottom margin",
        (false, false) => "it lies outside the page margins",
    }
}
