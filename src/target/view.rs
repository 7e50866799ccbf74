use crate::{
    foundation::core::Pixel,
    sample::bilinear,
    target::{
        format::RtFormat,
        pixel::{read_pixel, write_pixel},
    },
};

/// Read-only window onto the bytes of one mip level.
///
/// Views are what the accessor, sampler and mip generator actually operate on; borrowing one
/// level immutably while another is borrowed mutably is how mip generation stays safe under
/// parallelism.
#[derive(Clone, Copy, Debug)]
pub struct MipView<'a> {
    bytes: &'a [u8],
    width: u16,
    height: u16,
    format: RtFormat,
}

impl<'a> MipView<'a> {
    pub(crate) fn new(bytes: &'a [u8], width: u16, height: u16, format: RtFormat) -> Self {
        debug_assert_eq!(
            bytes.len(),
            usize::from(width) * usize::from(height) * format.pixel_size()
        );
        Self {
            bytes,
            width,
            height,
            format,
        }
    }

    /// Level width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Level height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixel format of the level.
    pub fn format(&self) -> RtFormat {
        self.format
    }

    /// Raw bytes of the level, row-major with no padding.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Pixel at `(x, y)`; zero when out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u16, y: u16) -> Pixel {
        match pixel_offset(self.width, self.height, self.format, x, y) {
            Some(offset) => read_pixel(self.format, self.bytes, offset),
            None => Pixel::default(),
        }
    }

    /// Wrap-addressed bilinear sample at normalized `(u, v)`.
    #[inline]
    pub fn sample_bilinear(&self, u: f32, v: f32) -> Pixel {
        bilinear::sample(self, u, v)
    }
}

/// Mutable window onto the bytes of one mip level.
#[derive(Debug)]
pub struct MipViewMut<'a> {
    bytes: &'a mut [u8],
    width: u16,
    height: u16,
    format: RtFormat,
}

impl<'a> MipViewMut<'a> {
    pub(crate) fn new(bytes: &'a mut [u8], width: u16, height: u16, format: RtFormat) -> Self {
        debug_assert_eq!(
            bytes.len(),
            usize::from(width) * usize::from(height) * format.pixel_size()
        );
        Self {
            bytes,
            width,
            height,
            format,
        }
    }

    /// Level width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Level height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixel format of the level.
    pub fn format(&self) -> RtFormat {
        self.format
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> MipView<'_> {
        MipView::new(self.bytes, self.width, self.height, self.format)
    }

    /// Raw bytes of the level.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        self.bytes
    }

    /// Pixel at `(x, y)`; zero when out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u16, y: u16) -> Pixel {
        self.as_view().get_pixel(x, y)
    }

    /// Store `px` at `(x, y)`; out-of-bounds writes are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: u16, y: u16, px: Pixel) {
        if let Some(offset) = pixel_offset(self.width, self.height, self.format, x, y) {
            write_pixel(self.format, self.bytes, offset, px);
        }
    }
}

#[inline]
fn pixel_offset(width: u16, height: u16, format: RtFormat, x: u16, y: u16) -> Option<usize> {
    if x >= width || y >= height {
        return None;
    }
    Some((usize::from(y) * usize::from(width) + usize::from(x)) * format.pixel_size())
}
