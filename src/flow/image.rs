use super::Align;
use crate::canvas::Canvas;
use crate::error::{LayoutError, ValidationError};
use crate::image::Image;
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;
use std::path::Path;

/// Where and how large an image is drawn. Height always follows from the width and the
/// image's aspect ratio.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePlacement {
    /// Flowed at the cursor, sized as a share of the usable page width
    Proportional {
        /// Percentage of the usable width, 100 when not given
        width_percent: Option<f32>,
        align: Align,
        /// Extra distance below the top margin when the image moves to a new page
        page_break_offset: Option<Pt>,
    },
    /// Drawn with its top-left corner at `(x, y)`, `width` wide. Never breaks the page.
    Explicit { x: Pt, y: Pt, width: Pt },
}

impl Default for ImagePlacement {
    fn default() -> Self {
        ImagePlacement::Proportional {
            width_percent: None,
            align: Align::default(),
            page_break_offset: None,
        }
    }
}

impl ImagePlacement {
    /// A centred image taking `percent` of the usable width
    pub fn proportional(percent: f32) -> ImagePlacement {
        ImagePlacement::Proportional {
            width_percent: Some(percent),
            align: Align::default(),
            page_break_offset: None,
        }
    }

    pub fn explicit(x: Pt, y: Pt, width: Pt) -> ImagePlacement {
        ImagePlacement::Explicit { x, y, width }
    }

    /// Set the alignment of a proportional placement; explicit placements are unaffected
    pub fn aligned(mut self, to: Align) -> ImagePlacement {
        if let ImagePlacement::Proportional { align, .. } = &mut self {
            *align = to;
        }
        self
    }

    /// Set the page break offset of a proportional placement; explicit placements are
    /// unaffected
    pub fn with_page_break_offset(mut self, offset: Pt) -> ImagePlacement {
        if let ImagePlacement::Proportional {
            page_break_offset, ..
        } = &mut self
        {
            *page_break_offset = Some(offset);
        }
        self
    }
}

/// Load an image from disk and place it. See [render_image_data].
pub fn render_image<C, P>(
    canvas: &mut C,
    path: P,
    placement: &ImagePlacement,
) -> Result<Rect, PDFError>
where
    C: Canvas + ?Sized,
    P: AsRef<Path>,
{
    let image = Image::new_from_disk(path)?;
    render_image_data(canvas, image, placement)
}

/// Place an image on the canvas, returning where it went (top-down).
///
/// Explicit placements are drawn exactly where asked, or rejected with
/// [LayoutError::ImageOutOfBounds] if they are wider than the usable width or would end
/// below the bottom margin line. The cursor doesn't move.
///
/// Proportional placements are drawn at the cursor. If the image would end below the
/// bottom margin, a new page is started and the image goes at the top margin plus the
/// page break offset; if it still doesn't fit there, [LayoutError::ImageTooTall] is
/// returned and the new page stays. Afterwards the cursor sits at the left margin just
/// below the image.
pub fn render_image_data<C: Canvas + ?Sized>(
    canvas: &mut C,
    image: Image,
    placement: &ImagePlacement,
) -> Result<Rect, PDFError> {
    let aspect = image.aspect_ratio();

    match *placement {
        ImagePlacement::Explicit { x, y, width } => {
            let height = width / aspect;
            let overflows_right = width > canvas.usable_width();
            let overflows_bottom = y + height > canvas.bottom_limit();
            if overflows_right || overflows_bottom {
                return Err(LayoutError::ImageOutOfBounds {
                    overflows_right,
                    overflows_bottom,
                }
                .into());
            }

            let position = Rect::from_origin(x, y, width, height);
            log::debug!("placing image at {position:?}");
            canvas.draw_image(image, position);
            Ok(position)
        }
        ImagePlacement::Proportional {
            width_percent,
            align,
            page_break_offset,
        } => {
            let percent = width_percent.unwrap_or(100.0);
            if !percent.is_finite() {
                return Err(ValidationError::NonFinitePercentage.into());
            }
            if percent < 0.0 {
                return Err(ValidationError::NegativePercentage(percent).into());
            }

            let width = canvas.usable_width() * (percent / 100.0);
            let height = width / aspect;

            let (_, mut y) = canvas.cursor();
            if y + height > canvas.bottom_limit() {
                log::debug!("image of height {height} crosses the bottom margin, starting a new page");
                canvas.add_page();
                let top = canvas.margins().top + page_break_offset.unwrap_or_default();
                if top + height > canvas.bottom_limit() {
                    return Err(LayoutError::ImageTooTall { height: height.0 }.into());
                }
                y = top;
            }

            let position = Rect::from_origin(align.x_for(canvas, width), y, width, height);
            log::debug!("placing image at {position:?}");
            canvas.draw_image(image, position);

            let left = canvas.margins().left;
            canvas.set_cursor(left, y + height);
            Ok(position)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::testing::{Op, RecordingCanvas};
    use image::DynamicImage;

    fn wide_image() -> Image {
        Image::new_raster(DynamicImage::new_rgb8(400, 200))
    }

    #[test]
    fn proportional_images_scale_with_the_usable_width() {
        let mut canvas = RecordingCanvas::a4();
        let placed = render_image_data(&mut canvas, wide_image(), &ImagePlacement::proportional(50.0))
            .expect("image fits");

        // usable width 170, so 85 x 42.5, centred between the margins
        assert_eq!(placed.width(), Pt(85.0));
        assert_eq!(placed.height(), Pt(42.5));
        assert_eq!(placed.x1, Pt(20.0) + (Pt(170.0) - Pt(85.0)) / 2.0);
        assert_eq!(placed.y1, Pt(20.0));
        assert_eq!(canvas.cursor, (Pt(20.0), Pt(62.5)));
    }

    #[test]
    fn missing_percentage_uses_the_full_width() {
        let mut canvas = RecordingCanvas::a4();
        let placed = render_image_data(&mut canvas, wide_image(), &ImagePlacement::default())
            .expect("image fits");
        assert_eq!(placed.width(), Pt(170.0));
        assert_eq!(placed.x1, Pt(20.0));
    }

    #[test]
    fn aligns_left_and_right() {
        let mut canvas = RecordingCanvas::a4();
        let left = ImagePlacement::proportional(20.0).aligned(Align::Left);
        let right = ImagePlacement::proportional(20.0).aligned(Align::Right);

        let placed = render_image_data(&mut canvas, wide_image(), &left).expect("fits");
        assert_eq!(placed.x1, Pt(20.0));
        let placed = render_image_data(&mut canvas, wide_image(), &right).expect("fits");
        assert_eq!(placed.x2, Pt(190.0));
    }

    #[test]
    fn rejects_bad_percentages_without_drawing() {
        let mut canvas = RecordingCanvas::a4();
        let negative = render_image_data(&mut canvas, wide_image(), &ImagePlacement::proportional(-5.0));
        assert!(matches!(
            negative,
            Err(PDFError::Validation(ValidationError::NegativePercentage(_)))
        ));
        let nan = render_image_data(&mut canvas, wide_image(), &ImagePlacement::proportional(f32::NAN));
        assert!(matches!(
            nan,
            Err(PDFError::Validation(ValidationError::NonFinitePercentage))
        ));
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn overflowing_images_move_to_a_new_page() {
        let mut canvas = RecordingCanvas::a4();
        canvas.cursor.1 = Pt(250.0);
        let placement = ImagePlacement::proportional(50.0).with_page_break_offset(Pt(10.0));

        let placed = render_image_data(&mut canvas, wide_image(), &placement).expect("fits on the next page");
        assert_eq!(placed.y1, Pt(30.0));
        assert_eq!(canvas.ops[0], Op::AddPage);
        assert!(matches!(canvas.ops[1], Op::Image { page: 1, .. }));
        assert_eq!(canvas.cursor.1, Pt(72.5));
    }

    #[test]
    fn images_taller_than_a_page_fail_after_the_break() {
        let mut canvas = RecordingCanvas::a4();
        let tall = Image::new_raster(DynamicImage::new_rgb8(100, 400));
        canvas.cursor.1 = Pt(100.0);

        let result = render_image_data(&mut canvas, tall, &ImagePlacement::default());
        assert!(matches!(
            result,
            Err(PDFError::Layout(LayoutError::ImageTooTall { .. }))
        ));
        assert_eq!(canvas.ops, vec![Op::AddPage]);
    }

    #[test]
    fn explicit_images_land_exactly_where_asked() {
        let mut canvas = RecordingCanvas::a4();
        let placement = ImagePlacement::explicit(Pt(30.0), Pt(40.0), Pt(60.0));
        let placed = render_image_data(&mut canvas, wide_image(), &placement).expect("fits");
        assert_eq!(placed, Rect::from_origin(Pt(30.0), Pt(40.0), Pt(60.0), Pt(30.0)));
        assert_eq!(canvas.cursor, (Pt(20.0), Pt(20.0)));
    }

    #[test]
    fn explicit_images_outside_the_margins_are_rejected() {
        let mut canvas = RecordingCanvas::a4();

        let too_wide = ImagePlacement::explicit(Pt(20.0), Pt(20.0), Pt(180.0));
        let result = render_image_data(&mut canvas, wide_image(), &too_wide);
        assert!(matches!(
            result,
            Err(PDFError::Layout(LayoutError::ImageOutOfBounds {
                overflows_right: true,
                overflows_bottom: false
            }))
        ));

        // 100 wide means 50 tall, ending at 230 + 50 = 280 > 277
        let too_low = ImagePlacement::explicit(Pt(20.0), Pt(230.0), Pt(100.0));
        let result = render_image_data(&mut canvas, wide_image(), &too_low);
        assert!(matches!(
            result,
            Err(PDFError::Layout(LayoutError::ImageOutOfBounds {
                overflows_right: false,
                overflows_bottom: true
            }))
        ));

        assert!(canvas.ops.is_empty());
    }
}
