use anyhow::Context as _;

use crate::{foundation::error::MipbufResult, io::sandbox::Sandbox};

/// A texture that arrives as an opaque container file (for example a compressed GPU texture
/// format) and parses itself from raw bytes.
pub trait ContainerTexture: Sized {
    /// Parse `bytes`, reporting malformed contents as an error.
    fn from_bytes(bytes: Vec<u8>) -> MipbufResult<Self>;
}

impl Sandbox {
    /// Read the file at `relative_path` under this sandbox and parse it as `T`.
    #[tracing::instrument(skip(self), fields(root = %self.root().display()))]
    pub fn read_container<T: ContainerTexture>(&self, relative_path: &str) -> MipbufResult<T> {
        let path = self.resolve_existing(relative_path)?;
        let bytes =
            std::fs::read(&path).with_context(|| format!("read container '{}'", path.display()))?;
        tracing::debug!(len = bytes.len(), path = %path.display(), "container read");
        T::from_bytes(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/io/container.rs"]
mod tests;
