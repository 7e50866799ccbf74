//! Filesystem boundary: sandboxed path resolution and the image codec bridge.

pub(crate) mod bridge;
pub(crate) mod codec;
pub(crate) mod container;
pub(crate) mod sandbox;
