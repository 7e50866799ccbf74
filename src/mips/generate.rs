use rayon::prelude::*;

use crate::{
    foundation::error::{MipbufError, MipbufResult},
    target::{
        render_target::RenderTarget,
        view::{MipView, MipViewMut},
    },
};

/// Threading options for mip generation.
///
/// Rows within one level are independent and may run in parallel; levels always run in order
/// because level `k` samples the finished level `k - 1`. The default is serial.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MipGenOpts {
    /// Spread each level's rows across rayon workers.
    pub parallel: bool,
    /// Dedicated worker count (parallel mode only). `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

impl MipGenOpts {
    /// Single-threaded generation, same as [`MipGenOpts::default`].
    pub fn serial() -> Self {
        Self::default()
    }
}

impl RenderTarget {
    /// Fill mips `1..mip_count` from mip 0 by bilinear downsampling on the calling thread.
    ///
    /// Each destination pixel samples the previous level at its own pixel center, which averages
    /// the 2x2 parent block for power-of-two sizes. A no-op on invalid or single-level targets.
    pub fn generate_mips(&mut self) {
        self.generate_levels(false);
    }

    /// [`RenderTarget::generate_mips`] with explicit threading; see [`MipGenOpts`].
    #[tracing::instrument(level = "debug", skip(self), fields(id = ?self.id()))]
    pub fn generate_mips_with(&mut self, opts: &MipGenOpts) -> MipbufResult<()> {
        if opts.parallel
            && let Some(threads) = opts.threads
        {
            let pool = build_thread_pool(threads)?;
            pool.install(|| self.generate_levels(true));
        } else {
            self.generate_levels(opts.parallel);
        }
        Ok(())
    }

    fn generate_levels(&mut self, parallel: bool) {
        if !self.is_valid() {
            return;
        }
        for mip in 1..self.mip_count() {
            if let Some((src, dst)) = self.parent_and_level_mut(mip) {
                downsample_level(src, dst, parallel);
            }
        }
        tracing::debug!(levels = self.mip_count(), parallel, "mip chain generated");
    }
}

fn downsample_level(src: MipView<'_>, mut dst: MipViewMut<'_>, parallel: bool) {
    let width = dst.width();
    let height = dst.height();
    let format = dst.format();
    let row_bytes = usize::from(width) * format.pixel_size();

    let fill_row = |(y, row): (usize, &mut [u8])| {
        let mut row_view = MipViewMut::new(row, width, 1, format);
        let v = (y as f32 + 0.5) / f32::from(height);
        for x in 0..width {
            let u = (f32::from(x) + 0.5) / f32::from(width);
            row_view.set_pixel(x, 0, src.sample_bilinear(u, v));
        }
    };

    let bytes = dst.bytes_mut();
    if parallel {
        bytes.par_chunks_mut(row_bytes).enumerate().for_each(fill_row);
    } else {
        bytes.chunks_mut(row_bytes).enumerate().for_each(fill_row);
    }
}

fn build_thread_pool(threads: usize) -> MipbufResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(MipbufError::validation(
            "mip generation 'threads' must be >= 1 when set",
        ));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| MipbufError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/mips/generate.rs"]
mod tests;
