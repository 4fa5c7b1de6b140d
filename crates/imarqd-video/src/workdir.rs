//! A scoped temporary work directory for one `embed_video`/`extract_video`
//! call (`spec.md` §3, §5 "Temp-resource release").

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// An RAII guard around a platform temp directory. Dropping it removes the
/// directory and everything under it, on every exit path including panics
/// unwinding through the call — the same guarantee `tempfile::TempDir`
/// itself provides, exposed here with the specific subpaths this pipeline
/// needs.
pub struct TempWorkDir {
    dir: TempDir,
}

impl TempWorkDir {
    /// Creates a new scoped work directory.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self { dir: TempDir::new()? })
    }

    /// The directory frames are decoded into.
    #[must_use]
    pub fn frames_dir(&self) -> PathBuf {
        self.dir.path().join("frames")
    }

    /// The directory watermarked/copied frames are written to before
    /// re-encoding.
    #[must_use]
    pub fn marked_dir(&self) -> PathBuf {
        self.dir.path().join("marked")
    }

    /// The extracted-audio AAC side-file path.
    #[must_use]
    pub fn audio_path(&self) -> PathBuf {
        self.dir.path().join("audio.aac")
    }

    /// The pre-normalized source video path.
    #[must_use]
    pub fn normalized_path(&self) -> PathBuf {
        self.dir.path().join("pre_norm.mp4")
    }

    /// The root of the scoped directory, for anything bespoke.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_is_removed_on_drop() {
        let path;
        {
            let work = TempWorkDir::new().unwrap();
            path = work.root().to_path_buf();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }
}
