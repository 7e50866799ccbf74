//! Format-dispatched pixel encode/decode at a byte offset.
//!
//! Callers are responsible for bounds: `offset + format.pixel_size()` must lie inside `bytes`.

use crate::{foundation::core::Pixel, target::format::RtFormat};

#[inline]
pub(crate) fn decode_unorm8(byte: u8) -> f32 {
    f32::from(byte) / 255.0
}

#[inline]
pub(crate) fn encode_unorm8(v: f32) -> u8 {
    // NaN saturates to 0 through the float-to-int cast.
    (v * 255.0).clamp(0.0, 255.0) as u8
}

/// Decode the pixel stored at `offset`. Channels the format lacks, and alpha, stay `0.0`.
#[inline]
pub(crate) fn read_pixel(format: RtFormat, bytes: &[u8], offset: usize) -> Pixel {
    let stride = format.channel_stride();
    let mut px = Pixel::default();
    for c in 0..format.channel_count() {
        let at = offset + c * stride;
        let v = if format.is_float() {
            bytemuck::pod_read_unaligned::<f32>(&bytes[at..at + 4])
        } else {
            decode_unorm8(bytes[at])
        };
        px.set_channel(c, v);
    }
    px
}

/// Encode `px` at `offset`. Only the format's channels are written; alpha is dropped.
#[inline]
pub(crate) fn write_pixel(format: RtFormat, bytes: &mut [u8], offset: usize, px: Pixel) {
    let stride = format.channel_stride();
    for c in 0..format.channel_count() {
        let at = offset + c * stride;
        let v = px.channel(c);
        if format.is_float() {
            bytes[at..at + 4].copy_from_slice(bytemuck::bytes_of(&v));
        } else {
            bytes[at] = encode_unorm8(v);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/target/pixel.rs"]
mod tests;
