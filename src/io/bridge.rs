use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{MipbufError, MipbufResult},
    io::{
        codec::{self, ImageExt},
        sandbox::Sandbox,
    },
    target::{format::RtFormat, layout::mips_from_dimensions, render_target::RenderTarget},
};

impl RenderTarget {
    /// Replace this target's contents with an image file from inside `sandbox`.
    ///
    /// The path must stay under the sandbox root and, if it has an extension, must be one of
    /// `png`, `jpg`, `bmp` or `hdr`. Float targets decode through the float path, 8-bit targets
    /// through the 8-bit path, both converted to the target's channel count. The target is resized
    /// to the image (discarding previous contents) with a full mip chain when `generate_mips` is
    /// set, in which case the chain is also filled.
    ///
    /// The target is only mutated once decoding has succeeded.
    #[tracing::instrument(skip(self, sandbox), fields(id = ?self.id(), format = %self.format()))]
    pub fn load(
        &mut self,
        sandbox: &Sandbox,
        relative_path: &str,
        generate_mips: bool,
    ) -> MipbufResult<()> {
        if !self.is_valid() {
            return Err(MipbufError::invalid_target(
                "load requires an allocated render target",
            ));
        }

        let path = sandbox.resolve_existing(relative_path)?;
        if path.extension().is_some() && ImageExt::from_path(&path).is_none() {
            tracing::warn!(path = %path.display(), "refusing to load unsupported extension");
            return Err(MipbufError::extension(format!(
                "'{relative_path}' is not a png, jpg, bmp or hdr file"
            )));
        }

        let decoded = codec::decode(&path, self.format())?;
        let (width, height) = match (
            u16::try_from(decoded.width),
            u16::try_from(decoded.height),
        ) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(MipbufError::validation(format!(
                    "image {}x{} exceeds the {}x{} render target limit",
                    decoded.width,
                    decoded.height,
                    u16::MAX,
                    u16::MAX
                )));
            }
        };
        let expected = usize::from(width) * usize::from(height) * self.pixel_size();
        if decoded.bytes.len() != expected {
            return Err(MipbufError::codec(format!(
                "decoded {} bytes for a {width}x{height} {} image, expected {expected}",
                decoded.bytes.len(),
                self.format()
            )));
        }

        let mips = if generate_mips {
            mips_from_dimensions(width, height)
        } else {
            1
        };
        self.resize(width, height, mips)?;
        let base = self
            .raw_data_mut(0)
            .ok_or_else(|| MipbufError::invalid_target("resized target has no base level"))?;
        base.copy_from_slice(&decoded.bytes);

        if generate_mips {
            self.generate_mips();
        }
        tracing::debug!(width, height, mips, path = %path.display(), "image loaded");
        Ok(())
    }

    /// Write mip level `mip` to an image file inside `sandbox`, returning the path written.
    ///
    /// A `png`, `jpg`, `bmp` or `hdr` extension on the path selects the encoder. Anything else,
    /// including no extension, gets the default (`hdr` for float targets, `png` otherwise)
    /// appended, so `frame.001` becomes `frame.001.png`. Missing directories are created.
    #[tracing::instrument(skip(self, sandbox), fields(id = ?self.id(), format = %self.format()))]
    pub fn save(&self, sandbox: &Sandbox, relative_path: &str, mip: u8) -> MipbufResult<PathBuf> {
        if mip >= self.mip_count() {
            return Err(MipbufError::validation(format!(
                "mip {mip} out of range for a target with {} levels",
                self.mip_count()
            )));
        }

        let (name, ext) = output_name(relative_path, self.format());
        let level = self
            .mip(mip)
            .ok_or_else(|| MipbufError::invalid_target("save requires an allocated target"))?;
        let path = sandbox.prepare_output(&name)?;
        codec::encode(ext, &path, &level)?;

        tracing::debug!(path = %path.display(), %ext, "mip saved");
        Ok(path)
    }
}

/// Final file name and encoder for a save request.
fn output_name(relative_path: &str, format: RtFormat) -> (String, ImageExt) {
    match ImageExt::from_path(Path::new(relative_path)) {
        Some(ext) => (relative_path.to_string(), ext),
        None => {
            let ext = ImageExt::default_for(format);
            (format!("{relative_path}.{ext}"), ext)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/io/bridge.rs"]
mod tests;
