//! Render-target storage: formats, mip layout, the owning buffer and per-level views.

pub(crate) mod format;
pub(crate) mod layout;
pub(crate) mod pixel;
pub(crate) mod render_target;
pub(crate) mod view;
