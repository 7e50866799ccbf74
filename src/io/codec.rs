//! Adapter between render-target byte layouts and the `image` crate's codecs.
//!
//! | Extension | Direction | Codec |
//! |---|---|---|
//! | `png` | decode/encode | `image` PNG, 8-bit `L8`/`La8`/`Rgb8` |
//! | `bmp` | decode/encode | `image` BMP, 8-bit |
//! | `jpg` | decode/encode | `image` JPEG, quality 95, grey or RGB |
//! | `hdr` | decode/encode | `image` Radiance HDR, `f32` RGB |
//!
//! Decoding always converts to the target's channel count (1 = luma, 2 = luma + alpha,
//! 3 = RGB). Encoding quantizes or expands between 8-bit and float as needed.

use std::{borrow::Cow, fs::File, io::BufWriter, path::Path};

use anyhow::Context as _;
use image::{ColorType, DynamicImage, ExtendedColorType, ImageEncoder as _, ImageFormat, Rgb};

use crate::{
    foundation::error::{MipbufError, MipbufResult},
    target::{
        format::RtFormat,
        pixel::{decode_unorm8, encode_unorm8},
        view::MipView,
    },
};

/// JPEG quality used for every `jpg` save.
pub const JPEG_QUALITY: u8 = 95;

/// On-disk image formats the bridge reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageExt {
    /// Portable Network Graphics.
    Png,
    /// JPEG.
    Jpg,
    /// Windows bitmap.
    Bmp,
    /// Radiance RGBE.
    Hdr,
}

impl ImageExt {
    /// Match a file extension (without the dot), ignoring ASCII case.
    pub fn parse(ext: &str) -> Option<Self> {
        [Self::Png, Self::Jpg, Self::Bmp, Self::Hdr]
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(ext))
    }

    /// Extension of `path`, if it has one that parses.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::parse)
    }

    /// Lowercase extension text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Bmp => "bmp",
            Self::Hdr => "hdr",
        }
    }

    /// Default save format for a target format: `hdr` for float targets, `png` otherwise.
    pub fn default_for(format: RtFormat) -> Self {
        if format.is_float() { Self::Hdr } else { Self::Png }
    }
}

impl std::fmt::Display for ImageExt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded pixels in the target's channel layout, row-major with no padding.
#[derive(Debug)]
pub(crate) struct Decoded {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Bytes ready to copy into a mip of the requested format.
    pub(crate) bytes: Vec<u8>,
}

/// Decode the file at `path` into `format`'s channel count and storage type.
pub(crate) fn decode(path: &Path, format: RtFormat) -> MipbufResult<Decoded> {
    let img = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("sniff image format of '{}'", path.display()))?
        .decode()
        .map_err(|e| MipbufError::codec(format!("decode '{}': {e}", path.display())))?;

    let (width, height) = (img.width(), img.height());
    let bytes = if format.is_float() {
        let samples = float_samples(&img, format.channel_count());
        bytemuck::cast_slice::<f32, u8>(&samples).to_vec()
    } else {
        unorm8_samples(&img, format.channel_count())
    };
    Ok(Decoded {
        width,
        height,
        bytes,
    })
}

fn unorm8_samples(img: &DynamicImage, channels: usize) -> Vec<u8> {
    match channels {
        1 => img.to_luma8().into_raw(),
        2 => img.to_luma_alpha8().into_raw(),
        _ => img.to_rgb8().into_raw(),
    }
}

// Rec. 709 weights, the same ones the 8-bit luma conversion uses.
fn luma(r: f32, g: f32, b: f32) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

fn float_samples(img: &DynamicImage, channels: usize) -> Vec<f32> {
    match channels {
        1 => img
            .to_rgb32f()
            .pixels()
            .map(|p| luma(p[0], p[1], p[2]))
            .collect(),
        2 => img
            .to_rgba32f()
            .pixels()
            .flat_map(|p| [luma(p[0], p[1], p[2]), p[3]])
            .collect(),
        _ => img.to_rgb32f().into_raw(),
    }
}

/// Encode one mip level to `path` as `ext`.
pub(crate) fn encode(ext: ImageExt, path: &Path, level: &MipView<'_>) -> MipbufResult<()> {
    let width = u32::from(level.width());
    let height = u32::from(level.height());
    let channels = level.format().channel_count();

    match ext {
        ImageExt::Hdr => {
            let samples = level_as_f32(level);
            let rgb: Vec<Rgb<f32>> = samples
                .chunks_exact(channels)
                .map(|px| match px {
                    [r, g, b] => Rgb([*r, *g, *b]),
                    [grey, ..] => Rgb([*grey, *grey, *grey]),
                    [] => Rgb([0.0; 3]),
                })
                .collect();
            let writer = create(path)?;
            image::codecs::hdr::HdrEncoder::new(writer)
                .encode(&rgb, width as usize, height as usize)
                .map_err(|e| codec_error(ext, path, e))
        }
        ImageExt::Png | ImageExt::Bmp => {
            let bytes = level_as_unorm8(level);
            let format = if ext == ImageExt::Png {
                ImageFormat::Png
            } else {
                ImageFormat::Bmp
            };
            image::save_buffer_with_format(
                path,
                &bytes,
                width,
                height,
                unorm8_color(channels),
                format,
            )
            .map_err(|e| codec_error(ext, path, e))
        }
        ImageExt::Jpg => {
            let bytes = level_as_unorm8(level);
            // JPEG has no grey+alpha layout; keep the first channel.
            let (bytes, color) = if channels == 2 {
                let grey: Vec<u8> = bytes.chunks_exact(2).map(|px| px[0]).collect();
                (Cow::Owned(grey), ExtendedColorType::L8)
            } else {
                (bytes, unorm8_color(channels).into())
            };
            let writer = create(path)?;
            image::codecs::jpeg::JpegEncoder::new_with_quality(writer, JPEG_QUALITY)
                .write_image(&bytes, width, height, color)
                .map_err(|e| codec_error(ext, path, e))
        }
    }
}

fn unorm8_color(channels: usize) -> ColorType {
    match channels {
        1 => ColorType::L8,
        2 => ColorType::La8,
        _ => ColorType::Rgb8,
    }
}

fn level_as_unorm8<'a>(level: &MipView<'a>) -> Cow<'a, [u8]> {
    if !level.format().is_float() {
        return Cow::Borrowed(level.bytes());
    }
    Cow::Owned(
        level
            .bytes()
            .chunks_exact(4)
            .map(|c| encode_unorm8(bytemuck::pod_read_unaligned::<f32>(c)))
            .collect(),
    )
}

fn level_as_f32(level: &MipView<'_>) -> Vec<f32> {
    if level.format().is_float() {
        level
            .bytes()
            .chunks_exact(4)
            .map(bytemuck::pod_read_unaligned::<f32>)
            .collect()
    } else {
        level.bytes().iter().copied().map(decode_unorm8).collect()
    }
}

fn create(path: &Path) -> MipbufResult<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(BufWriter::new(file))
}

fn codec_error(ext: ImageExt, path: &Path, e: image::ImageError) -> MipbufError {
    MipbufError::codec(format!("encode {ext} '{}': {e}", path.display()))
}

#[cfg(test)]
#[path = "../../tests/unit/io/codec.rs"]
mod tests;
