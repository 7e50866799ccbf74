//! Path sandboxing for user-supplied relative paths.
//!
//! A [`Sandbox`] owns one root directory. Every path handed to it is resolved lexically on
//! decomposed components: absolute paths and drive prefixes are refused, `.` is dropped, and `..`
//! may only cancel a component that was previously pushed. The result must be a strict descendant
//! of the root, compared with [`Path::starts_with`] (component-wise), so a root of `/data/x` never
//! admits `/data/x2`. Paths that must already exist are additionally canonicalized and checked
//! against the canonical root, which closes symlink escapes.

use std::{
    fs::File,
    io::BufReader,
    path::{Component, Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::error::{MipbufError, MipbufResult};

/// A directory that resolved paths may not leave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Sandbox rooted at `root`. Relative roots are made absolute against the working directory
    /// at resolution time.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured root, as given.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative` under the root without touching the filesystem.
    pub fn resolve(&self, relative: &str) -> MipbufResult<PathBuf> {
        let root = self.absolute_root()?;
        let mut out = root.clone();
        let mut depth = 0usize;

        let normalized = relative.replace('\\', "/");
        for component in Path::new(&normalized).components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return Err(self.reject(relative, "sandboxed paths must be relative"));
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if depth == 0 {
                        return Err(self.reject(relative, "path climbs above the sandbox root"));
                    }
                    out.pop();
                    depth -= 1;
                }
                Component::Normal(part) => {
                    out.push(part);
                    depth += 1;
                }
            }
        }

        if !is_descendant(&out, &root) {
            return Err(self.reject(relative, "path does not name an entry under the root"));
        }
        Ok(out)
    }

    /// Resolve `relative` to an existing file under an existing root.
    ///
    /// Fails when the root is missing, the path escapes lexically, the target does not exist, or
    /// the canonical target (symlinks followed) lies outside the canonical root.
    pub fn resolve_existing(&self, relative: &str) -> MipbufResult<PathBuf> {
        let root = self.absolute_root()?;
        if !root.is_dir() {
            return Err(MipbufError::sandbox(format!(
                "sandbox root '{}' is not a directory",
                root.display()
            )));
        }

        let resolved = self.resolve(relative)?;
        let canonical = std::fs::canonicalize(&resolved)
            .with_context(|| format!("open '{}'", resolved.display()))?;
        self.ensure_contains(&canonical)?;
        Ok(resolved)
    }

    /// Resolve `relative` for writing, creating the sandbox root and any missing parent
    /// directories the path implies.
    ///
    /// Directories are created one component at a time, and every component that already exists
    /// is canonicalized and checked first, so a symlinked directory can never cause anything to
    /// be created outside the root. An existing symlink at the leaf must point inside the root.
    pub fn prepare_output(&self, relative: &str) -> MipbufResult<PathBuf> {
        let resolved = self.resolve(relative)?;
        let root = self.absolute_root()?;
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create sandbox root '{}'", root.display()))?;
        let canonical_root = self.canonical_root()?;

        let inner = resolved
            .strip_prefix(&root)
            .map_err(|_| self.reject(relative, "path does not name an entry under the root"))?;
        let mut dir = root;
        for component in inner.parent().into_iter().flat_map(Path::components) {
            dir.push(component);
            match std::fs::symlink_metadata(&dir) {
                Ok(_) => {
                    let canonical = std::fs::canonicalize(&dir)
                        .with_context(|| format!("canonicalize '{}'", dir.display()))?;
                    if !canonical.starts_with(&canonical_root) {
                        return Err(
                            self.reject(relative, "output directory resolves outside the root")
                        );
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    std::fs::create_dir(&dir)
                        .with_context(|| format!("create output dir '{}'", dir.display()))?;
                }
                Err(e) => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("inspect '{}'", dir.display()))
                        .into());
                }
            }
        }

        if let Ok(meta) = std::fs::symlink_metadata(&resolved)
            && meta.file_type().is_symlink()
        {
            let target = std::fs::canonicalize(&resolved)
                .map_err(|_| self.reject(relative, "output is a dangling symlink"))?;
            if !is_descendant(&target, &canonical_root) {
                return Err(self.reject(relative, "output symlink points outside the root"));
            }
        }
        Ok(resolved)
    }

    fn ensure_contains(&self, canonical: &Path) -> MipbufResult<()> {
        let root = self.canonical_root()?;
        if !is_descendant(canonical, &root) {
            tracing::warn!(
                path = %canonical.display(),
                root = %root.display(),
                "canonical path escapes sandbox"
            );
            return Err(MipbufError::sandbox(format!(
                "'{}' resolves outside sandbox root '{}'",
                canonical.display(),
                root.display()
            )));
        }
        Ok(())
    }

    fn absolute_root(&self) -> MipbufResult<PathBuf> {
        let abs = std::path::absolute(&self.root).map_err(|e| {
            MipbufError::sandbox(format!(
                "sandbox root '{}' cannot be made absolute: {e}",
                self.root.display()
            ))
        })?;
        Ok(lexically_normalize(&abs))
    }

    fn canonical_root(&self) -> MipbufResult<PathBuf> {
        let root = self.absolute_root()?;
        std::fs::canonicalize(&root).map_err(|e| {
            MipbufError::sandbox(format!(
                "sandbox root '{}' is unavailable: {e}",
                root.display()
            ))
        })
    }

    fn reject(&self, relative: &str, why: &str) -> MipbufError {
        tracing::warn!(path = relative, root = %self.root.display(), why, "sandbox rejected path");
        MipbufError::sandbox(format!(
            "'{relative}' rejected under '{}': {why}",
            self.root.display()
        ))
    }
}

/// `path` lies strictly below `root`, compared component by component.
pub fn is_descendant(path: &Path, root: &Path) -> bool {
    path != root && path.starts_with(root)
}

fn lexically_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// The two sandbox roots used by the image bridge.
///
/// Loads read from `load_root`; saves write under the broader `save_root`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SandboxConfig {
    /// Root that `load` resolves against.
    pub load_root: PathBuf,
    /// Root that `save` resolves against.
    pub save_root: PathBuf,
}

impl SandboxConfig {
    /// Conventional layout under `base`: saves go to `base/data`, loads come from
    /// `base/data/mipbuf`.
    pub fn from_base(base: impl AsRef<Path>) -> Self {
        let save_root = base.as_ref().join("data");
        Self {
            load_root: save_root.join("mipbuf"),
            save_root,
        }
    }

    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MipbufResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MipbufError::validation(format!("parse sandbox config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MipbufResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MipbufError::validation(format!("open sandbox config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Sandbox for reads.
    pub fn load_sandbox(&self) -> Sandbox {
        Sandbox::new(&self.load_root)
    }

    /// Sandbox for writes.
    pub fn save_sandbox(&self) -> Sandbox {
        Sandbox::new(&self.save_root)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/io/sandbox.rs"]
mod tests;
