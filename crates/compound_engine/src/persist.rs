use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use compound_core::DownloadTask;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot use {path:?} as the download directory: {source}")]
    Prepare { path: PathBuf, source: io::Error },
    #[error("cannot write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// The directory downloaded images are written into.
///
/// Images are named by [`DownloadTask::file_name`] and written through a
/// sibling temp file, so an interrupted download never leaves a truncated
/// image under its final name. A rerun replaces earlier images.
#[derive(Debug, Clone)]
pub struct ImageDir {
    root: PathBuf,
}

impl ImageDir {
    /// Creates `root` if needed and checks that files can be created in it.
    pub fn prepare(root: PathBuf) -> Result<Self, PersistError> {
        let prepare_error = |source| PersistError::Prepare {
            path: root.clone(),
            source,
        };
        if root.exists() && !root.is_dir() {
            return Err(prepare_error(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "path exists and is not a directory",
            )));
        }
        fs::create_dir_all(&root).map_err(prepare_error)?;
        NamedTempFile::new_in(&root).map_err(prepare_error)?;
        Ok(Self { root })
    }

    pub fn store(&self, task: &DownloadTask, bytes: &[u8]) -> Result<PathBuf, PersistError> {
        let target = self.root.join(task.file_name());
        let write_error = |source| PersistError::Write {
            path: target.clone(),
            source,
        };

        // The directory may have been removed since the run started.
        fs::create_dir_all(&self.root).map_err(write_error)?;
        let mut staged = NamedTempFile::new_in(&self.root).map_err(write_error)?;
        staged.write_all(bytes).map_err(write_error)?;
        staged.as_file().sync_all().map_err(write_error)?;
        staged
            .persist(&target)
            .map_err(|err| write_error(err.error))?;
        Ok(target)
    }
}
