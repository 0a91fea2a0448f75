//! Conversion of page contents into PDF content stream operators.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, SpanFont, SpanLayout, StrokeLayout};
use id_arena::Arena;
use std::io::Write;

/// Renders page contents to an (uncompressed) PDF content stream.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts)?;
            }
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    image.position.width(),
                    image.position.height(),
                    image.position.x1,
                    image.position.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Stroke(stroke) => {
                render_stroke(&mut content, stroke)?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_stroke(content: &mut Vec<u8>, stroke: &StrokeLayout) -> Result<(), std::io::Error> {
    let StrokeLayout {
        rect,
        colour,
        line_width,
    } = stroke;
    write!(content, "q\n")?;
    write!(content, "{line_width} w\n")?;
    write!(content, "{}\n", colour.operator(true))?;
    write!(
        content,
        "{} {} {} {} re S\n",
        rect.x1,
        rect.y1,
        rect.width(),
        rect.height()
    )?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;

    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        current_font.size
    )?;
    write!(content, "{}\n", current_colour.operator(false))?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write!(content, "{}\n", current_colour.operator(false))?;
        }

        let font = &fonts[current_font.id];
        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        for ch in span.text.chars() {
            let gid = font
                .glyph_id(ch)
                .or_else(|| font.replacement_glyph_id())
                .unwrap_or_default();
            write!(content, "{gid:04x}")?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::page::StrokeLayout;
    use crate::rect::Rect;
    use crate::units::Pt;

    #[test]
    fn strokes_render_as_rectangles() {
        let contents = vec![PageContents::Stroke(StrokeLayout {
            rect: Rect::from_origin(Pt(10.0), Pt(20.0), Pt(30.0), Pt(5.0)),
            colour: colours::BLACK,
            line_width: Pt(0.5),
        })];
        let fonts: Arena<Font> = Arena::new();
        let rendered = render_contents(&contents, &fonts).expect("can render");
        let rendered = String::from_utf8(rendered).expect("content is ascii");
        assert_eq!(rendered, "q\n0.5 w\n0 G\n10 20 30 5 re S\nQ\n");
    }
}
