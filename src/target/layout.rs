use crate::foundation::math::mip_extent;

/// Dimensions of one mip level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MipDims {
    /// Width in pixels, at least 1.
    pub width: u16,
    /// Height in pixels, at least 1.
    pub height: u16,
}

impl MipDims {
    /// Pixel count of the level.
    pub fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Byte layout of a whole mip chain inside one contiguous buffer.
///
/// Level 0 sits at offset 0 and every following level starts right after the previous one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MipLayout {
    dims: Vec<MipDims>,
    offsets: Vec<usize>,
    total_size: usize,
}

impl MipLayout {
    /// Lay out `mip_count` levels of a `width x height` image with `pixel_size` bytes per pixel.
    ///
    /// An empty base image (either dimension zero) yields an empty layout with `total_size == 0`
    /// regardless of `mip_count`.
    pub fn compute(width: u16, height: u16, mip_count: u8, pixel_size: usize) -> Self {
        if width == 0 || height == 0 || mip_count == 0 || pixel_size == 0 {
            return Self::default();
        }

        let mut dims = Vec::with_capacity(usize::from(mip_count));
        let mut offsets = Vec::with_capacity(usize::from(mip_count));
        let mut total_size = 0usize;
        for mip in 0..mip_count {
            let level = MipDims {
                width: mip_extent(width, mip),
                height: mip_extent(height, mip),
            };
            offsets.push(total_size);
            total_size += pixel_size * level.area();
            dims.push(level);
        }

        Self {
            dims,
            offsets,
            total_size,
        }
    }

    /// Number of levels.
    pub fn mip_count(&self) -> usize {
        self.dims.len()
    }

    /// Dimensions of level `mip`, if it exists.
    pub fn dims(&self, mip: u8) -> Option<MipDims> {
        self.dims.get(usize::from(mip)).copied()
    }

    /// Byte offset of level `mip`, if it exists.
    pub fn offset(&self, mip: u8) -> Option<usize> {
        self.offsets.get(usize::from(mip)).copied()
    }

    /// Byte range `[start, end)` of level `mip` within the buffer.
    pub fn byte_range(&self, mip: u8) -> Option<std::ops::Range<usize>> {
        let i = usize::from(mip);
        let start = *self.offsets.get(i)?;
        let end = self.offsets.get(i + 1).copied().unwrap_or(self.total_size);
        Some(start..end)
    }

    /// All level offsets in order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Total buffer size in bytes.
    pub fn total_size(&self) -> usize {
        self.total_size
    }
}

/// Number of levels in a full chain from `width x height` down to 1x1:
/// `ceil(log2(max(width, height))) + 1`.
pub fn mips_from_dimensions(width: u16, height: u16) -> u8 {
    let largest = width.max(height);
    if largest <= 1 {
        return 1;
    }
    // ceil(log2(n)) for n >= 2 is the bit length of n - 1.
    let ceil_log2 = u16::BITS - (largest - 1).leading_zeros();
    (ceil_log2 + 1) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/target/layout.rs"]
mod tests;
