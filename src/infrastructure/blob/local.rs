//! Local Blob Store
//!
//! Keeps artifacts, icons and staged uploads in three directories on local
//! disk. Staged uploads are created with `tempfile` inside the staging dir so
//! that committing them is a same-filesystem rename whenever possible.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::config::StorageConfig;
use crate::domain::ports::{BlobError, BlobResult, BlobStore};

#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    uploads_dir: PathBuf,
    icons_dir: PathBuf,
    staging_dir: PathBuf,
}

impl LocalBlobStore {
    pub fn new(
        uploads_dir: impl Into<PathBuf>,
        icons_dir: impl Into<PathBuf>,
        staging_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
            icons_dir: icons_dir.into(),
            staging_dir: staging_dir.into(),
        }
    }

    pub fn from_config(storage: &StorageConfig) -> Self {
        Self::new(
            &storage.uploads_dir,
            &storage.icons_dir,
            storage.staging_dir(),
        )
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn icons_dir(&self) -> &Path {
        &self.icons_dir
    }

    /// Path of a committed artifact, if `file_name` is a plain file name.
    pub fn artifact_path(&self, file_name: &str) -> BlobResult<PathBuf> {
        Ok(self.uploads_dir.join(plain_name(file_name)?))
    }

    /// Path of an icon by its file name inside the icons dir.
    pub fn icon_file(&self, file_name: &str) -> BlobResult<PathBuf> {
        Ok(self.icons_dir.join(plain_name(file_name)?))
    }

    fn create_dir(dir: &Path) -> BlobResult<()> {
        fs::create_dir_all(dir).map_err(|e| BlobError::io(dir, e))
    }
}

impl BlobStore for LocalBlobStore {
    fn stage(&self, content: &[u8]) -> BlobResult<PathBuf> {
        Self::create_dir(&self.staging_dir)?;
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".part")
            .tempfile_in(&self.staging_dir)
            .map_err(|e| BlobError::io(&self.staging_dir, e))?;
        file.write_all(content)
            .map_err(|e| BlobError::io(file.path(), e))?;
        let (_, path) = file
            .keep()
            .map_err(|e| BlobError::io(&self.staging_dir, e.error))?;
        Ok(path)
    }

    fn discard(&self, staged: &Path) -> BlobResult<()> {
        fs::remove_file(staged).map_err(|e| BlobError::io(staged, e))
    }

    fn commit_artifact(&self, staged: &Path, file_name: &str) -> BlobResult<u64> {
        let target = self.artifact_path(file_name)?;
        Self::create_dir(&self.uploads_dir)?;

        if fs::rename(staged, &target).is_err() {
            // Staging and uploads may sit on different filesystems.
            fs::copy(staged, &target).map_err(|e| BlobError::io(&target, e))?;
            if let Err(e) = fs::remove_file(staged) {
                tracing::warn!(path = %staged.display(), error = %e, "failed to remove staged upload");
            }
        }

        fs::metadata(&target)
            .map(|m| m.len())
            .map_err(|e| BlobError::io(&target, e))
    }

    fn remove_artifact(&self, file_name: &str) -> BlobResult<()> {
        let path = self.artifact_path(file_name)?;
        fs::remove_file(&path).map_err(|e| BlobError::io(path, e))
    }

    fn save_icon(&self, package_name: &str, png: &[u8]) -> BlobResult<String> {
        let path = self.icon_file(&format!("{}.png", package_name))?;
        Self::create_dir(&self.icons_dir)?;
        fs::write(&path, png).map_err(|e| BlobError::io(&path, e))?;
        Ok(path.to_string_lossy().replace('\\', "/"))
    }

    fn remove_icon(&self, icon_path: &str) -> BlobResult<()> {
        let path = Path::new(icon_path);
        // Only icons this store handed out may be removed.
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| BlobError::InvalidName(icon_path.to_string()))?;
        let own = self.icon_file(name)?;
        if own != path {
            return Err(BlobError::InvalidName(icon_path.to_string()));
        }
        fs::remove_file(&own).map_err(|e| BlobError::io(own, e))
    }
}

/// Accept only a single normal path component.
fn plain_name(name: &str) -> BlobResult<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(name),
        _ => Err(BlobError::InvalidName(name.to_string())),
    }
}
