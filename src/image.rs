use crate::refs::{ObjectReferences, RefType};
use crate::PDFError;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::{Path, PathBuf};

/// How the pixels of an image end up in the PDF
pub enum RasterImageType {
    /// An RGB JPEG file, embedded byte-for-byte with a DCT filter
    DirectlyEmbeddableJpeg(PathBuf),
    /// Anything else, re-encoded as Flate-compressed RGB with an optional soft mask
    Image(DynamicImage),
}

/// A decoded raster image along with its size in pixels
pub struct Image {
    pub image: RasterImageType,
    pub width: f32,
    pub height: f32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image from disk. JPEG files in the RGB colour space are embedded as-is,
    /// everything else that the [image] crate can read is decoded and re-compressed.
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, PDFError> {
        let path = path.as_ref();
        let is_tga = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tga"));

        let data = std::fs::read(path)?;

        let format = if is_tga {
            ImageFormat::Tga
        } else {
            image::guess_format(&data)?
        };
        let image = image::load_from_memory_with_format(&data, format)?;

        match (format, image.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => Ok(Image {
                width: image.width() as f32,
                height: image.height() as f32,
                image: RasterImageType::DirectlyEmbeddableJpeg(path.to_owned()),
            }),
            _ => Ok(Self::new_raster(image)),
        }
    }

    /// Wrap an already decoded image
    pub fn new_raster(image: DynamicImage) -> Image {
        let width = image.width() as f32;
        let height = image.height() as f32;
        Image {
            image: RasterImageType::Image(image),
            width,
            height,
        }
    }

    /// Width over height, in pixels
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    fn encode(&self) -> Result<EncodeOutput, PDFError> {
        match &self.image {
            RasterImageType::DirectlyEmbeddableJpeg(path) => {
                let bytes = std::fs::read(path)?;
                Ok(EncodeOutput {
                    filter: Filter::DctDecode,
                    bytes,
                    mask: None,
                })
            }
            RasterImageType::Image(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                Ok(EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                })
            }
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode()?;

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_pixel_dimensions() {
        let image = Image::new_raster(DynamicImage::new_rgb8(400, 200));
        assert_eq!(image.width, 400.0);
        assert_eq!(image.height, 200.0);
        assert_eq!(image.aspect_ratio(), 2.0);
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("wide.png");
        DynamicImage::new_rgba8(30, 10)
            .save(&path)
            .expect("can save png");

        let image = Image::new_from_disk(&path).expect("can load png");
        assert_eq!(image.aspect_ratio(), 3.0);
        assert!(matches!(image.image, RasterImageType::Image(_)));
    }

    #[test]
    fn missing_files_are_io_errors() {
        let result = Image::new_from_disk("/definitely/not/here.png");
        assert!(matches!(result, Err(PDFError::Io(_))));
    }
}
