//! [`JpegNormalizer`] — the canonical document-image transform.

use std::io::Cursor;

use image::{
  DynamicImage, GenericImageView, ImageReader, RgbImage,
  codecs::jpeg::JpegEncoder, imageops::FilterType, metadata::Orientation,
};
use tracing::debug;

use verid_core::{identification::Image, media::ImageCodec};

use crate::Result;

/// The fixed size of the constrained dimension: height for landscape input,
/// width for portrait or square.
const CANONICAL_EDGE: u32 = 720;

const JPEG_QUALITY: u8 = 85;

/// Normalizes raw image bytes into the persisted form.
///
/// Steps, in order: decode; apply embedded EXIF orientation so the pixels
/// are stored upright; resize with one dimension fixed at 720 and the other
/// scaled to preserve aspect ratio; flatten any transparency onto a white
/// background (downstream display assumes opaque images); encode as JPEG.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegNormalizer;

impl ImageCodec for JpegNormalizer {
  type Error = crate::Error;

  fn normalize(&self, raw: &[u8]) -> Result<Image> {
    let mut decoded = ImageReader::new(Cursor::new(raw))
      .with_guessed_format()?
      .decode()?;

    if let Some(orientation) = exif_orientation(raw) {
      decoded.apply_orientation(orientation);
    }

    let (width, height) = decoded.dimensions();
    let (target_w, target_h) = canonical_dimensions(width, height);
    let resized = if (width, height) == (target_w, target_h) {
      decoded
    } else {
      debug!(width, height, target_w, target_h, "resizing document image");
      decoded.resize_exact(target_w, target_h, FilterType::Lanczos3)
    };

    let opaque = flatten_onto_white(resized);

    let mut data = Vec::new();
    opaque.write_with_encoder(JpegEncoder::new_with_quality(
      &mut data,
      JPEG_QUALITY,
    ))?;
    Ok(Image {
      content_type: "image/jpeg".to_owned(),
      data,
    })
  }
}

/// Landscape (width > height) constrains height to 720; portrait and square
/// constrain width. The free dimension preserves aspect ratio, never below 1.
fn canonical_dimensions(width: u32, height: u32) -> (u32, u32) {
  let edge = f64::from(CANONICAL_EDGE);
  if width > height {
    let w = (f64::from(width) * edge / f64::from(height)).round() as u32;
    (w.max(1), CANONICAL_EDGE)
  } else {
    let h = (f64::from(height) * edge / f64::from(width)).round() as u32;
    (CANONICAL_EDGE, h.max(1))
  }
}

/// The EXIF orientation to undo, if the container carries one.
fn exif_orientation(raw: &[u8]) -> Option<Orientation> {
  let exif = exif::Reader::new()
    .read_from_container(&mut Cursor::new(raw))
    .ok()?;
  let value = exif
    .get_field(exif::Tag::Orientation, exif::In::PRIMARY)?
    .value
    .get_uint(0)?;
  Orientation::from_exif(u8::try_from(value).ok()?)
}

/// Composite over a white background, discarding the alpha channel.
fn flatten_onto_white(img: DynamicImage) -> RgbImage {
  if !img.color().has_alpha() {
    return img.to_rgb8();
  }
  let rgba = img.to_rgba8();
  let mut flat = RgbImage::new(rgba.width(), rgba.height());
  for (src, dst) in rgba.pixels().zip(flat.pixels_mut()) {
    let [r, g, b, a] = src.0;
    let a = u16::from(a);
    let blend = |c: u8| -> u8 {
      ((u16::from(c) * a + 255 * (255 - a) + 127) / 255) as u8
    };
    dst.0 = [blend(r), blend(g), blend(b)];
  }
  flat
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{ImageFormat, Rgb, Rgba, RgbaImage};

  fn png_bytes(img: DynamicImage) -> Vec<u8> {
    let mut out = Vec::new();
    img
      .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
      .expect("png encode");
    out
  }

  fn normalize(raw: &[u8]) -> Image {
    JpegNormalizer.normalize(raw).expect("normalize")
  }

  fn decoded_dimensions(image: &Image) -> (u32, u32) {
    let decoded = image::load_from_memory(&image.data).expect("jpeg decode");
    decoded.dimensions()
  }

  #[test]
  fn landscape_constrains_height_to_720() {
    let raw = png_bytes(DynamicImage::new_rgb8(2000, 1000));
    let out = normalize(&raw);
    assert_eq!(out.content_type, "image/jpeg");
    assert_eq!(decoded_dimensions(&out), (1440, 720));
  }

  #[test]
  fn portrait_constrains_width_to_720() {
    let raw = png_bytes(DynamicImage::new_rgb8(1000, 2000));
    let out = normalize(&raw);
    assert_eq!(decoded_dimensions(&out), (720, 1440));
  }

  #[test]
  fn square_is_treated_as_portrait() {
    let raw = png_bytes(DynamicImage::new_rgb8(500, 500));
    let out = normalize(&raw);
    assert_eq!(decoded_dimensions(&out), (720, 720));
  }

  #[test]
  fn output_is_well_formed_jpeg() {
    let raw = png_bytes(DynamicImage::new_rgb8(640, 480));
    let out = normalize(&raw);
    assert_eq!(
      image::guess_format(&out.data).expect("format"),
      ImageFormat::Jpeg
    );
  }

  #[test]
  fn transparency_is_flattened_onto_white() {
    let mut rgba = RgbaImage::new(900, 450);
    for p in rgba.pixels_mut() {
      *p = Rgba([0, 0, 0, 0]); // fully transparent black
    }
    let raw = png_bytes(DynamicImage::ImageRgba8(rgba));
    let out = normalize(&raw);

    let decoded = image::load_from_memory(&out.data).expect("decode").to_rgb8();
    // JPEG is lossy; near-white is close enough to prove the flatten ran.
    let Rgb([r, g, b]) = *decoded.get_pixel(10, 10);
    assert!(r > 250 && g > 250 && b > 250, "got ({r}, {g}, {b})");
  }

  #[test]
  fn renormalizing_a_canonical_image_preserves_dimensions_and_format() {
    let raw = png_bytes(DynamicImage::new_rgb8(2000, 1000));
    let once = normalize(&raw);
    let twice = normalize(&once.data);
    assert_eq!(decoded_dimensions(&twice), (1440, 720));
    assert_eq!(
      image::guess_format(&twice.data).expect("format"),
      ImageFormat::Jpeg
    );
  }

  #[test]
  fn undecodable_bytes_are_an_error() {
    assert!(JpegNormalizer.normalize(b"definitely not an image").is_err());
  }

  #[test]
  fn canonical_dimensions_math() {
    assert_eq!(canonical_dimensions(2000, 1000), (1440, 720));
    assert_eq!(canonical_dimensions(1000, 2000), (720, 1440));
    assert_eq!(canonical_dimensions(720, 720), (720, 720));
    // Small input is scaled up to the canonical edge.
    assert_eq!(canonical_dimensions(100, 200), (720, 1440));
  }

  #[test]
  fn images_without_exif_have_no_orientation() {
    let raw = png_bytes(DynamicImage::new_rgb8(10, 10));
    assert!(exif_orientation(&raw).is_none());
  }
}
