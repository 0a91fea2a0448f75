use super::breaks::{column_widths, row_breaks_page};
use super::Align;
use crate::canvas::{Border, Canvas, FontStyle, TextAlign, TextPaint};
use crate::error::ValidationError;
use crate::units::{Mm, Pt};
use crate::PDFError;

/// Column percentages are accepted when they sum to 100 within this much
const PERCENT_TOLERANCE: f32 = 1e-3;

/// Tabular data that can be drawn with [render_table]
pub trait TableSource {
    /// Names of every column, in their natural order
    fn column_names(&self) -> Vec<String>;

    /// The values of the named columns, one `Vec` per row in row order, with the values
    /// in the order the columns were asked for
    fn select(&self, columns: &[String]) -> Result<Vec<Vec<String>>, ValidationError>;
}

/// An in-memory table of named columns
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TableData {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new<I, S>(columns: I) -> TableData
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TableData {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, which must have exactly one value per column
    pub fn push_row<I, S>(&mut self, row: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let row: Vec<String> = row.into_iter().map(|value| value.to_string()).collect();
        if row.len() != self.columns.len() {
            return Err(ValidationError::RowLength {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TableSource for TableData {
    fn column_names(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn select(&self, columns: &[String]) -> Result<Vec<Vec<String>>, ValidationError> {
        let indices = columns
            .iter()
            .map(|name| {
                self.columns
                    .iter()
                    .position(|column| column == name)
                    .ok_or_else(|| ValidationError::UnknownColumn(name.clone()))
            })
            .collect::<Result<Vec<usize>, ValidationError>>()?;

        Ok(self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect())
    }
}

/// How a table is laid out by [render_table]
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Line height of the wrapped cell text, and so the minimum height of a row
    pub row_height: Pt,
    /// Columns to draw, in order. All of them when not given.
    pub columns: Option<Vec<String>>,
    /// Header labels, one per drawn column. The column names when not given.
    pub labels: Option<Vec<String>>,
    /// Table width as a percentage of the usable page width, 100 when not given
    pub width_percent: Option<f32>,
    /// Share of the table width each column takes, in percent. Must sum to 100.
    /// Columns share the width evenly when not given.
    pub column_percents: Option<Vec<f32>>,
    /// Horizontal placement of the table. Starts at the cursor when not given.
    pub align: Option<Align>,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            row_height: Mm(5.0).into(),
            columns: None,
            labels: None,
            width_percent: None,
            column_percents: None,
            align: None,
        }
    }
}

impl TableOptions {
    pub fn row_height<H: Into<Pt>>(mut self, height: H) -> Self {
        self.row_height = height.into();
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn width_percent(mut self, percent: f32) -> Self {
        self.width_percent = Some(percent);
        self
    }

    pub fn column_percents(mut self, percents: Vec<f32>) -> Self {
        self.column_percents = Some(percents);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    fn table_width<C: Canvas + ?Sized>(&self, canvas: &C) -> Result<Pt, ValidationError> {
        let percent = self.width_percent.unwrap_or(100.0);
        check_percent(percent)?;
        Ok(canvas.usable_width() * (percent / 100.0))
    }

    fn column_widths(&self, table_width: Pt, columns: usize) -> Result<Vec<Pt>, ValidationError> {
        let percents = match &self.column_percents {
            Some(percents) => percents,
            None if columns == 0 => return Ok(Vec::new()),
            None => return Ok(vec![table_width / columns as f32; columns]),
        };

        if percents.len() != columns {
            return Err(ValidationError::ColumnCount {
                expected: columns,
                found: percents.len(),
            });
        }
        for &percent in percents {
            check_percent(percent)?;
        }
        let sum: f32 = percents.iter().sum();
        if (sum - 100.0).abs() > PERCENT_TOLERANCE {
            return Err(ValidationError::ColumnPercentagesSum(sum));
        }

        Ok(percents
            .iter()
            .map(|percent| table_width * (percent / 100.0))
            .collect())
    }
}

fn check_percent(percent: f32) -> Result<(), ValidationError> {
    if !percent.is_finite() {
        Err(ValidationError::NonFinitePercentage)
    } else if percent < 0.0 {
        Err(ValidationError::NegativePercentage(percent))
    } else {
        Ok(())
    }
}

/// Draw one table row at the cursor and return its height.
///
/// Each value is wrapped into its own column with lines `row_height` tall, so cells can
/// end up of different heights. The row is drawn in three passes: the text is first laid
/// out invisibly to find the tallest cell, then drawn for real, and finally every column
/// gets a border as tall as that tallest cell. Header rows are set in bold.
///
/// Columns take their widths from `widths`; if there are fewer widths than values, the
/// usable width is split evenly instead. Afterwards the font style is regular, the text
/// paint is what it was before the call and the cursor sits at the row's bottom-left
/// corner.
pub fn render_row<C, S>(canvas: &mut C, row: &[S], widths: &[Pt], row_height: Pt, header: bool) -> Pt
where
    C: Canvas + ?Sized,
    S: ToString,
{
    let widths = column_widths(canvas, row.len(), widths);
    let values: Vec<String> = row.iter().map(ToString::to_string).collect();
    let (x0, y0) = canvas.cursor();
    let starts = column_starts(x0, &widths);
    let paint = canvas.text_paint();

    if header {
        canvas.set_font_style(FontStyle::Bold);
    }

    // measure
    canvas.set_text_paint(TextPaint::Invisible);
    let mut height = Pt(0.0);
    for ((&x, &width), value) in starts.iter().zip(&widths).zip(&values) {
        canvas.set_cursor(x, y0);
        canvas.multi_cell(width, row_height, value, Border::None, TextAlign::Justify);
        height = height.max(canvas.cursor().1 - y0);
    }

    canvas.set_text_paint(paint);
    for ((&x, &width), value) in starts.iter().zip(&widths).zip(&values) {
        canvas.set_cursor(x, y0);
        canvas.multi_cell(width, row_height, value, Border::None, TextAlign::Justify);
    }

    for (&x, &width) in starts.iter().zip(&widths) {
        canvas.set_cursor(x, y0);
        canvas.multi_cell(width, height, "", Border::All, TextAlign::Justify);
    }

    canvas.set_font_style(FontStyle::Regular);
    canvas.set_cursor(x0, y0 + height);
    height
}

fn column_starts(x0: Pt, widths: &[Pt]) -> Vec<Pt> {
    widths
        .iter()
        .scan(x0, |x, &width| {
            let start = *x;
            *x += width;
            Some(start)
        })
        .collect()
}

/// Draw a whole table at the cursor: a bold header row of labels, followed by one row per
/// record of `source`.
///
/// All options are checked before anything is drawn. Whenever the next row would
/// overflow the page, a new page is started and the header is drawn again at its top
/// before the row, so every page of the table opens with its header.
pub fn render_table<C, T>(canvas: &mut C, source: &T, options: &TableOptions) -> Result<(), PDFError>
where
    C: Canvas + ?Sized,
    T: TableSource + ?Sized,
{
    let columns = options
        .columns
        .clone()
        .unwrap_or_else(|| source.column_names());
    let labels = match &options.labels {
        Some(labels) if labels.len() != columns.len() => {
            return Err(ValidationError::LabelCount {
                expected: columns.len(),
                found: labels.len(),
            }
            .into());
        }
        Some(labels) => labels.clone(),
        None => columns.clone(),
    };
    let rows = source.select(&columns)?;
    let table_width = options.table_width(canvas)?;
    let widths = options.column_widths(table_width, columns.len())?;

    let (cursor_x, cursor_y) = canvas.cursor();
    let start_x = match options.align {
        Some(align) => align.x_for(canvas, table_width),
        None => cursor_x,
    };
    canvas.set_cursor(start_x, cursor_y);

    let row_height = options.row_height;
    if header_breaks_page(canvas, &labels, &widths, row_height) {
        log::debug!("table header would cross the bottom margin, starting a new page");
        break_page(canvas, start_x);
    }
    render_row(canvas, &labels, &widths, row_height, true);

    for (i, row) in rows.iter().enumerate() {
        if row_breaks_page(canvas, row, &widths, row_height) {
            log::debug!("table row {i} would cross the bottom margin, starting a new page");
            break_page(canvas, start_x);
            render_row(canvas, &labels, &widths, row_height, true);
        }
        render_row(canvas, row, &widths, row_height, false);
    }

    Ok(())
}

/// Predict the header row in the bold face it is drawn in
fn header_breaks_page<C: Canvas + ?Sized>(
    canvas: &mut C,
    labels: &[String],
    widths: &[Pt],
    row_height: Pt,
) -> bool {
    let style = canvas.font_style();
    canvas.set_font_style(FontStyle::Bold);
    let breaks = row_breaks_page(canvas, labels, widths, row_height);
    canvas.set_font_style(style);
    breaks
}

fn break_page<C: Canvas + ?Sized>(canvas: &mut C, x: Pt) {
    canvas.add_page();
    let top = canvas.margins().top;
    canvas.set_cursor(x, top);
}
