use super::breaks::cell_breaks_page;
use crate::canvas::{Border, Canvas, TextAlign};
use crate::units::Pt;

/// Draw wrapped text in a cell at the cursor, first moving to a new page if the cell is
/// predicted to cross the bottom margin. A `width` of zero extends the cell to the right
/// margin.
pub fn smart_multi_cell<C: Canvas + ?Sized>(
    canvas: &mut C,
    width: Pt,
    line_height: Pt,
    text: &str,
    border: Border,
    align: TextAlign,
) {
    if cell_breaks_page(canvas, text, width, line_height) {
        log::debug!("cell would cross the bottom margin, starting a new page");
        canvas.add_page();
    }
    canvas.multi_cell(width, line_height, text, border, align);

    // back onto the page if the cell ran past its bottom edge
    let (x, y) = canvas.cursor();
    canvas.set_cursor(x, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::testing::{Op, RecordingCanvas};

    #[test]
    fn cells_that_fit_stay_on_the_page() {
        let mut canvas = RecordingCanvas::a4();
        canvas.cursor.1 = Pt(200.0);
        smart_multi_cell(&mut canvas, Pt(40.0), Pt(5.0), "Hello", Border::None, TextAlign::Justify);

        assert_eq!(canvas.page_breaks(), 0);
        assert!(matches!(canvas.ops[0], Op::Cell { page: 0, .. }));
        assert_eq!(canvas.cursor.1, Pt(205.0));
    }

    #[test]
    fn cells_that_would_overflow_start_a_new_page() {
        let mut canvas = RecordingCanvas::a4();
        // one line plus the safety line ends at 278
        canvas.cursor.1 = Pt(268.0);
        smart_multi_cell(&mut canvas, Pt(40.0), Pt(5.0), "Hello", Border::All, TextAlign::Left);

        assert_eq!(canvas.ops[0], Op::AddPage);
        match &canvas.ops[1] {
            Op::Cell { page, y, border, .. } => {
                assert_eq!((*page, *y, *border), (1, Pt(20.0), Border::All));
            }
            other => panic!("expected a cell, got {other:?}"),
        }
    }

    #[test]
    fn zero_width_cells_are_predicted_at_full_width() {
        let mut canvas = RecordingCanvas::a4();
        // 80 characters fit the 170 wide usable area on a single line
        canvas.cursor.1 = Pt(267.0);
        let text = "word ".repeat(16);
        smart_multi_cell(&mut canvas, Pt(0.0), Pt(5.0), &text, Border::None, TextAlign::Justify);
        assert_eq!(canvas.page_breaks(), 0);
    }
}
