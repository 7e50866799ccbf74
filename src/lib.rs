//! mipbuf is a CPU-side, mip-mapped render target.
//!
//! A [`RenderTarget`] owns one contiguous byte buffer holding a chain of mip levels in one of six
//! [`RtFormat`]s (8-bit normalized or 32-bit float, one to three channels). On top of that buffer
//! it provides:
//!
//! - per-pixel reads and writes through the [`Pixel`] working type
//! - wrap-addressed bilinear sampling with normalized coordinates
//! - box-filtered mip generation, optionally parallel per level via `rayon`
//! - image load/save through the `image` crate, confined to a [`Sandbox`] root
//!
//! # Layout
//!
//! Level `k` is `max(1, width >> k)` by `max(1, height >> k)` pixels. Levels are packed
//! back to back, row-major, with no padding; see [`MipLayout`].
//!
//! # Errors
//!
//! Per-pixel accessors never fail: out-of-range or invalid-target reads return a zero [`Pixel`]
//! and writes are ignored. Structural operations (`resize`, `load`, `save`, sandbox resolution)
//! return [`MipbufResult`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod foundation;
mod io;
mod mips;
mod sample;
mod target;

pub use foundation::core::{Pixel, TargetId, TargetIdAllocator};
pub use foundation::error::{MipbufError, MipbufResult};
pub use io::codec::{ImageExt, JPEG_QUALITY};
pub use io::container::ContainerTexture;
pub use io::sandbox::{Sandbox, SandboxConfig, is_descendant};
pub use mips::generate::MipGenOpts;
pub use target::format::RtFormat;
pub use target::layout::{MipDims, MipLayout, mips_from_dimensions};
pub use target::render_target::RenderTarget;
pub use target::view::{MipView, MipViewMut};
