use crate::{
    foundation::{
        core::{Pixel, TargetId},
        error::{MipbufError, MipbufResult},
    },
    target::{
        format::RtFormat,
        layout::{MipDims, MipLayout},
        view::{MipView, MipViewMut},
    },
};

/// A mip-mapped CPU pixel buffer.
///
/// All levels live in one contiguous, exclusively owned allocation laid out by [`MipLayout`].
/// The format is fixed at construction. [`RenderTarget::resize`] is destructive: it always
/// rebuilds the whole chain zero-filled and never preserves previous contents.
///
/// Per-pixel calls (`get_pixel`, `set_pixel`, `sample_bilinear`) never fail: an invalid target,
/// a missing mip, or out-of-range coordinates read as a zero [`Pixel`] and drop writes.
#[derive(Clone, Debug)]
pub struct RenderTarget {
    id: Option<TargetId>,
    format: RtFormat,
    width: u16,
    height: u16,
    mip_count: u8,
    layout: MipLayout,
    buffer: Option<Vec<u8>>,
}

impl RenderTarget {
    /// Allocate a zero-filled target.
    ///
    /// A zero width or height produces an empty (invalid) target rather than an error.
    pub fn new(width: u16, height: u16, format: RtFormat, mip_count: u8) -> MipbufResult<Self> {
        let mut rt = Self::empty(format);
        rt.resize(width, height, mip_count)?;
        Ok(rt)
    }

    /// A target with no allocation.
    pub fn empty(format: RtFormat) -> Self {
        Self {
            id: None,
            format,
            width: 0,
            height: 0,
            mip_count: 0,
            layout: MipLayout::default(),
            buffer: None,
        }
    }

    /// Attach a caller-issued identity.
    pub fn with_id(mut self, id: TargetId) -> Self {
        self.id = Some(id);
        self
    }

    /// Identity attached with [`RenderTarget::with_id`], if any.
    pub fn id(&self) -> Option<TargetId> {
        self.id
    }

    /// Rebuild the whole mip chain at a new size, zero-filled.
    ///
    /// Zero dimensions clear the target and succeed. A `mip_count` of 0 for a non-empty size is
    /// treated as 1. On allocation failure the target is left cleared.
    #[tracing::instrument(level = "debug", skip(self), fields(id = ?self.id, format = %self.format))]
    pub fn resize(&mut self, width: u16, height: u16, mip_count: u8) -> MipbufResult<()> {
        let mip_count = mip_count.max(1);
        let layout = MipLayout::compute(width, height, mip_count, self.format.pixel_size());

        if layout.total_size() == 0 {
            self.clear();
            return Ok(());
        }

        // Drop the old allocation first so a large resize doesn't hold both.
        self.clear();
        let total = layout.total_size();
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(total)
            .map_err(|e| MipbufError::alloc(format!("render target of {total} bytes: {e}")))?;
        buffer.resize(total, 0u8);

        self.width = width;
        self.height = height;
        self.mip_count = mip_count;
        self.layout = layout;
        self.buffer = Some(buffer);
        tracing::debug!(total, "render target allocated");
        Ok(())
    }

    fn clear(&mut self) {
        self.buffer = None;
        self.layout = MipLayout::default();
        self.width = 0;
        self.height = 0;
        self.mip_count = 0;
    }

    /// Whether the target holds an allocation.
    pub fn is_valid(&self) -> bool {
        self.buffer.is_some() && self.layout.total_size() > 0
    }

    /// Base-level width.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Base-level height.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of mip levels.
    pub fn mip_count(&self) -> u8 {
        self.mip_count
    }

    /// Pixel format.
    pub fn format(&self) -> RtFormat {
        self.format
    }

    /// Bytes per pixel.
    pub fn pixel_size(&self) -> usize {
        self.format.pixel_size()
    }

    /// Total allocation size in bytes, all levels included.
    pub fn size(&self) -> usize {
        self.layout.total_size()
    }

    /// The byte layout of the chain.
    pub fn layout(&self) -> &MipLayout {
        &self.layout
    }

    /// Dimensions of level `mip`, if it exists.
    pub fn mip_dims(&self, mip: u8) -> Option<MipDims> {
        self.layout.dims(mip)
    }

    /// Bytes of level `mip`, row-major with no padding.
    ///
    /// The slice borrows the target, so it cannot outlive it or survive a resize.
    pub fn raw_data(&self, mip: u8) -> Option<&[u8]> {
        let range = self.layout.byte_range(mip)?;
        self.buffer.as_deref().map(|b| &b[range])
    }

    /// Mutable bytes of level `mip`.
    pub fn raw_data_mut(&mut self, mip: u8) -> Option<&mut [u8]> {
        let range = self.layout.byte_range(mip)?;
        self.buffer.as_deref_mut().map(|b| &mut b[range])
    }

    /// Read-only view of level `mip`.
    pub fn mip(&self, mip: u8) -> Option<MipView<'_>> {
        let dims = self.layout.dims(mip)?;
        let bytes = self.raw_data(mip)?;
        Some(MipView::new(bytes, dims.width, dims.height, self.format))
    }

    /// Mutable view of level `mip`.
    pub fn mip_mut(&mut self, mip: u8) -> Option<MipViewMut<'_>> {
        let dims = self.layout.dims(mip)?;
        let format = self.format;
        let bytes = self.raw_data_mut(mip)?;
        Some(MipViewMut::new(bytes, dims.width, dims.height, format))
    }

    /// Pixel at `(x, y)` in level `mip`, or zero when any of those is out of range.
    #[inline]
    pub fn get_pixel(&self, x: u16, y: u16, mip: u8) -> Pixel {
        self.mip(mip)
            .map(|view| view.get_pixel(x, y))
            .unwrap_or_default()
    }

    /// Store `px` at `(x, y)` in level `mip`; silently ignored when out of range.
    ///
    /// Only the format's channels are written. Alpha is never stored.
    #[inline]
    pub fn set_pixel(&mut self, x: u16, y: u16, px: Pixel, mip: u8) {
        if let Some(mut view) = self.mip_mut(mip) {
            view.set_pixel(x, y, px);
        }
    }

    /// Wrap-addressed bilinear sample of level `mip` at normalized `(u, v)`.
    #[inline]
    pub fn sample_bilinear(&self, u: f32, v: f32, mip: u8) -> Pixel {
        self.mip(mip)
            .map(|view| view.sample_bilinear(u, v))
            .unwrap_or_default()
    }

    /// Split the buffer into level `mip - 1` (read) and level `mip` (write).
    pub(crate) fn parent_and_level_mut(
        &mut self,
        mip: u8,
    ) -> Option<(MipView<'_>, MipViewMut<'_>)> {
        if mip == 0 {
            return None;
        }
        let src_dims = self.layout.dims(mip - 1)?;
        let dst_dims = self.layout.dims(mip)?;
        let src_range = self.layout.byte_range(mip - 1)?;
        let dst_range = self.layout.byte_range(mip)?;
        let format = self.format;

        let buffer = self.buffer.as_deref_mut()?;
        let (head, tail) = buffer.split_at_mut(dst_range.start);
        let src = &head[src_range];
        let dst = &mut tail[..dst_range.len()];
        Some((
            MipView::new(src, src_dims.width, src_dims.height, format),
            MipViewMut::new(dst, dst_dims.width, dst_dims.height, format),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/target/render_target.rs"]
mod tests;
