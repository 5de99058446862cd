//! Image transform: one source image → full + thumb WebP variants.
//!
//! Decode happens through the `image` crate, orientation comes from the EXIF
//! tag (the decoders do not apply it), and encoding goes through libwebp for
//! the lossy quality path. Both variants are resized from the *original*
//! decoded image, never from each other, so thumb sharpness does not depend
//! on the full variant's size.
//!
//! The existence of both output files is the incremental-build cache key —
//! there is no content check. The id in the output path already encodes the
//! source digest, so changed content lands at a different path anyway.

use crate::config::ImageSettings;
use crate::transform::{Outcome, TransformError};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbImage};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Produce both WebP variants for a source image.
///
/// Skip policy: when both targets exist and `force` is unset, the call is an
/// idempotent no-op (`UpToDate`) — the source is not even decoded.
pub fn transform_image(
    source: &Path,
    out_full: &Path,
    out_thumb: &Path,
    settings: &ImageSettings,
    force: bool,
) -> Result<Outcome, TransformError> {
    if !force && out_full.exists() && out_thumb.exists() {
        return Ok(Outcome::UpToDate);
    }

    let decoded = decode_oriented(source)?;
    let rgb = decoded.to_rgb8();

    // Nothing is written until decode has succeeded, so a corrupt source
    // leaves no partial outputs behind.
    let full = scale_to_max_width(&rgb, settings.max_full_width);
    encode_webp(&full, out_full, settings.quality)?;

    let thumb = scale_to_max_width(&rgb, settings.max_thumb_width);
    encode_webp(&thumb, out_thumb, settings.quality)?;

    Ok(Outcome::Written)
}

/// Decode a source image and apply its EXIF orientation, if any.
fn decode_oriented(source: &Path) -> Result<DynamicImage, TransformError> {
    let img = ImageReader::open(source)
        .map_err(|e| TransformError::Decode {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?
        .decode()
        .map_err(|e| TransformError::Decode {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(match read_exif_orientation(source) {
        Some(o) => apply_orientation(img, o),
        None => img,
    })
}

/// Read the EXIF Orientation tag (1-8). Lenient: any read or parse problem
/// means "no orientation".
fn read_exif_orientation(path: &Path) -> Option<u32> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|f| match &f.value {
            exif::Value::Short(v) => v.first().map(|&x| x as u32),
            _ => None,
        })
}

/// Rotate/flip the pixel buffer so it matches the intended visual
/// orientation. Values follow the EXIF Orientation tag; 1 and anything
/// out of range are passed through.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// Downscale to `max_width` preserving aspect ratio; images at or under the
/// bound are returned unchanged. Height is `round(h * max_width / w)`.
fn scale_to_max_width(img: &RgbImage, max_width: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    if w <= max_width {
        return img.clone();
    }
    let new_h = (h as f64 * max_width as f64 / w as f64).round() as u32;
    image::imageops::resize(img, max_width, new_h.max(1), FilterType::Lanczos3)
}

/// Encode as lossy WebP (method 6, maximum-effort compression) and write,
/// creating parent directories as needed.
fn encode_webp(img: &RgbImage, path: &Path, quality: f32) -> Result<(), TransformError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let encode_err = |message: String| TransformError::Encode {
        path: path.to_path_buf(),
        message,
    };

    let mut config =
        webp::WebPConfig::new().map_err(|_| encode_err("libwebp config init failed".into()))?;
    config.quality = quality;
    config.method = 6;

    let encoder = webp::Encoder::from_rgb(img.as_raw(), img.width(), img.height());
    let bytes = encoder
        .encode_advanced(&config)
        .map_err(|e| encode_err(format!("{e:?}")))?;

    fs::write(path, &*bytes).map_err(|e| encode_err(e.to_string()))
}
