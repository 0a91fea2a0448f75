use pdf_flow::canvas::{Border, Canvas, DocumentCanvas, FontStyle, TextAlign};
use pdf_flow::flow::{self, Align, ImagePlacement, TableData, TableOptions};
use pdf_flow::{Font, Image, Info, Pt};

fn main() {
    let regular = include_bytes!("../assets/DejaVuSans.ttf");
    let regular = Font::load(regular.to_vec()).expect("can load font");
    let bold = include_bytes!("../assets/DejaVuSans-Bold.ttf");
    let bold = Font::load(bold.to_vec()).expect("can load font");

    let mut canvas = DocumentCanvas::with_defaults(regular, Some(bold));
    canvas.set_info(
        Info::new()
            .title("Page Flow Report")
            .author("pdf-flow")
            .subject("Development Test / Example"),
    );

    canvas.set_font_size(Pt(16.0));
    canvas.set_font_style(FontStyle::Bold);
    flow::smart_multi_cell(&mut canvas, Pt(0.0), Pt(24.0), "Quarterly Report", Border::None, TextAlign::Center);
    canvas.set_font_style(FontStyle::Regular);
    canvas.set_font_size(Pt(10.0));

    for _ in 0..3 {
        flow::smart_multi_cell(&mut canvas, Pt(0.0), Pt(14.0), &lipsum::lipsum(80), Border::None, TextAlign::Justify);
    }

    // a gradient stands in for a chart
    let chart = image::RgbImage::from_fn(400, 160, |x, y| {
        image::Rgb([(x * 255 / 400) as u8, (y * 255 / 160) as u8, 160])
    });
    let chart = Image::new_raster(image::DynamicImage::ImageRgb8(chart));
    flow::render_image_data(
        &mut canvas,
        chart,
        &ImagePlacement::proportional(60.0).with_page_break_offset(Pt(12.0)),
    )
    .expect("chart fits on a page");

    let mut data = TableData::new(["region", "summary", "revenue"]);
    for i in 0..60 {
        data.push_row([
            format!("Region {}", i + 1),
            lipsum::lipsum(4 + i % 9),
            format!("{:.2}", 1000.0 + i as f32 * 137.5),
        ])
        .expect("three values");
    }
    let options = TableOptions::default()
        .labels(["Region", "Summary", "Revenue"])
        .width_percent(90.0)
        .column_percents(vec![20.0, 60.0, 20.0])
        .align(Align::Center);
    flow::render_table(&mut canvas, &data, &options).expect("valid table");

    println!("wrote {} pages", canvas.page_count());
    let out = std::fs::File::create("report.pdf").expect("can create report.pdf");
    canvas.write(out).expect("can write pdf");
}
