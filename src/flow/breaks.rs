use crate::canvas::Canvas;
use crate::units::Pt;

/// Extra lines added to every prediction before it is compared with the bottom margin
pub const SAFETY_LINES: usize = 1;

/// Number of lines `text` is predicted to take in a cell `width` wide (zero meaning the
/// full usable width), packing words greedily under the canvas's current font.
///
/// Each word is tentatively appended to the current line after a space; the append is
/// kept while the line stays strictly narrower than the cell. The last line counts even
/// when it is only partly filled, so the result is never zero.
pub fn predicted_line_count<C: Canvas + ?Sized>(canvas: &C, text: &str, width: Pt) -> usize {
    let width = if width <= Pt(0.0) {
        canvas.usable_width()
    } else {
        width
    };

    let mut closed = 0usize;
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = format!("{current} {word}");
        if canvas.width_of_text(&candidate) < width {
            current = candidate;
        } else {
            closed += 1;
            current = word.to_string();
        }
    }

    closed + 1
}

/// Predict whether drawing `text` as a wrapped cell at the cursor would push the cell's
/// bottom edge past the bottom margin. Nothing is drawn and the canvas is untouched.
pub fn cell_breaks_page<C: Canvas + ?Sized>(
    canvas: &C,
    text: &str,
    width: Pt,
    line_height: Pt,
) -> bool {
    let lines = predicted_line_count(canvas, text, width) + SAFETY_LINES;
    let (_, y) = canvas.cursor();
    let bottom = y + line_height * lines as f32;
    log::trace!(
        "cell of {lines} lines would end at {bottom} (limit {})",
        canvas.bottom_limit()
    );
    bottom > canvas.bottom_limit()
}

/// Predict whether any cell of a table row would overflow the page. Columns are checked
/// in order and the first overflowing one settles it.
pub fn row_breaks_page<C, S>(canvas: &C, row: &[S], widths: &[Pt], line_height: Pt) -> bool
where
    C: Canvas + ?Sized,
    S: ToString,
{
    let widths = column_widths(canvas, row.len(), widths);
    row.iter()
        .zip(widths)
        .any(|(value, width)| cell_breaks_page(canvas, &value.to_string(), width, line_height))
}

/// The widths to use for a row of `columns` cells: the given ones when there are enough
/// of them, otherwise the usable width split evenly.
pub(crate) fn column_widths<C: Canvas + ?Sized>(
    canvas: &C,
    columns: usize,
    widths: &[Pt],
) -> Vec<Pt> {
    if columns == 0 {
        Vec::new()
    } else if widths.len() >= columns {
        widths[..columns].to_vec()
    } else {
        vec![canvas.usable_width() / columns as f32; columns]
    }
}
