use crate::{
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// A parsed font object. Fonts can be TTF or OTF fonts, and will be embedded in their
/// entirety in the generated PDF, so large fonts may dramatically increase the size of
/// the generated PDF.
///
/// Fonts are referred to throughout the crate by their [Id] within the document.
pub struct Font {
    pub face: OwnedFace,
}

/// Advance width and height of a glyph in font units, keyed by glyph id
struct GlyphMetrics {
    chars: HashMap<u16, char>,
    sizes: HashMap<u16, (u16, i16)>,
}

impl GlyphMetrics {
    fn measure(face: &Face<'_>) -> GlyphMetrics {
        let mut chars: HashMap<u16, char> = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
                subtable.codepoints(|codepoint: u32| {
                    if let Ok(ch) = char::try_from(codepoint) {
                        if let Some(index) =
                            subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                        {
                            chars.entry(index.0).or_insert(ch);
                        }
                    }
                });
            }
        }

        let sizes = chars
            .keys()
            .filter_map(|&id| {
                let gid = GlyphId(id);
                let advance = face.glyph_hor_advance(gid)?;
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                Some((id, (advance, height)))
            })
            .collect();

        GlyphMetrics { chars, sizes }
    }
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    fn name_entry(&self, name_id: u16) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the full name of the font, or `"Unnamed"` if the font carries no name
    pub fn name(&self) -> String {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
            .unwrap_or_else(|| "Unnamed".to_string())
    }

    /// Obtain the family name of the font, falling back to the full name
    pub fn family(&self) -> String {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
            .unwrap_or_else(|| self.name())
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Pt) -> Pt {
        let leading = self.scaling(size) * self.face.as_face_ref().line_gap() as f32;
        leading + self.ascent(size) - self.descent(size)
    }

    /// Horizontal advance of a single character, using the replacement glyph for
    /// characters the font doesn't cover
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        let advance = self
            .glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .and_then(|gid| self.face.as_face_ref().glyph_hor_advance(GlyphId(gid)))
            .unwrap_or_default();
        self.scaling(size) * advance as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph drawn for characters that aren't in the font: U+FFFD if present, `?` otherwise
    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}').or_else(|| self.glyph_id('?'))
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        metrics: &GlyphMetrics,
        writer: &mut Pdf,
    ) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, metrics, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let scaling = 1000.0 / self.face.as_face_ref().units_per_em() as f32;

        // the most common advance becomes the default width
        let mut widths_counts: HashMap<u16, usize> = HashMap::new();
        for &(width, _) in metrics.sizes.values() {
            *widths_counts.entry(width).or_insert(0) += 1;
        }
        let most_common_width = widths_counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&width, _)| width as f32 * scaling)
            .unwrap_or(1000.0);

        let mut id_widths: Vec<(u16, f32)> = metrics
            .sizes
            .iter()
            .map(|(&cid, &(width, _))| (cid, width as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);

        // group runs of consecutive glyph ids into blocks
        let mut blocks: Vec<(u16, Vec<f32>)> = Vec::new();
        for (cid, width) in id_widths {
            let continues_run = blocks
                .last()
                .is_some_and(|(start, run)| cid as usize == *start as usize + run.len());
            match blocks.last_mut() {
                Some((_, run)) if continues_run => run.push(width),
                _ => blocks.push((cid, vec![width])),
            }
        }
        for (start, run) in blocks {
            widths.consecutive(start, run);
        }
        widths.finish();

        cid_font.default_width(most_common_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));

        writer
            .stream(id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        metrics: &GlyphMetrics,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);
        let face = self.face.as_face_ref();

        let max_width = metrics.sizes.values().map(|&(w, _)| w).max().unwrap_or_default();
        let max_height = metrics.sizes.values().map(|&(_, h)| h).max().unwrap_or_default();
        let sum_width: usize = metrics.sizes.values().map(|&(w, _)| w as usize).sum();
        let avg_width = sum_width as f32 / metrics.sizes.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));

        let name = self.name();
        let family = self.family();
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags: FontFlags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let scaling = 1000.0 / face.units_per_em() as f32;
        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: 0.0,
            x2: max_width as f32 * scaling,
            y2: max_height as f32 * scaling,
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .unwrap_or_else(|| face.capital_height().unwrap_or_default()) as f32
                * scaling,
        );
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        metrics: &GlyphMetrics,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map: String = r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
"#
        .replace("\r\n", "\n");

        let mut ids: Vec<(u16, char)> = metrics.chars.iter().map(|(&id, &ch)| (id, ch)).collect();
        ids.sort_by_key(|&(id, _)| id);

        // bfchar blocks hold at most 100 entries sharing a common high byte
        let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
        for (id, ch) in ids {
            let fits = blocks
                .last()
                .is_some_and(|block| block.len() < 100 && block[0].0 >> 8 == id >> 8);
            match blocks.last_mut() {
                Some(block) if fits => block.push((id, ch)),
                _ => blocks.push(vec![(id, ch)]),
            }
        }

        for block in blocks {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (id, ch) in block {
                let ch: u32 = ch.into();
                map.push_str(&format!("<{id:04x}> <{ch:04x}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let metrics = GlyphMetrics::measure(self.face.as_face_ref());

        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, &metrics, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &metrics, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dejavu() -> Font {
        Font::load(include_bytes!("../assets/DejaVuSans.ttf").to_vec()).expect("can load font")
    }

    #[test]
    fn reads_names_and_metrics() {
        let font = dejavu();
        assert_eq!(font.family(), "DejaVu Sans");
        assert!(font.ascent(Pt(10.0)) > Pt(0.0));
        assert!(font.descent(Pt(10.0)) < Pt(0.0));
        assert!(font.line_height(Pt(10.0)) > font.ascent(Pt(10.0)));
    }

    #[test]
    fn unknown_characters_use_the_replacement_advance() {
        let font = dejavu();
        assert!(font.advance('A', Pt(12.0)) > Pt(0.0));
        assert!(font.replacement_glyph_id().is_some());
        assert!(font.advance('\u{10FFFD}', Pt(12.0)) > Pt(0.0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Font::load(vec![0u8; 16]).is_err());
    }
}
