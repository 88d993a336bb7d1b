use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::FusionError;

/// A fully written artifact waiting in a temporary file next to its destination.
///
/// Dropping it without committing deletes the temporary file.
#[derive(Debug)]
pub struct StagedArtifact {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedArtifact {
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the artifact into place; an existing file at the target is never replaced
    pub fn commit(self) -> Result<PathBuf, FusionError> {
        let target = self.target;
        self.temp
            .persist_noclobber(&target)
            .map_err(|err| FusionError::unwritable(&target, err.error))?;
        Ok(target)
    }
}

/// Write an artifact into a temporary file in the destination directory.
///
/// Nothing is visible at `target` until [`StagedArtifact::commit`]; any failure while
/// writing removes the temporary file.
pub fn stage<F>(target: &Path, write: F) -> Result<StagedArtifact, FusionError>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|err| FusionError::unwritable(dir, err))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|err| FusionError::unwritable(target, err))?;

    let written = (|| {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
        drop(writer);
        temp.as_file().sync_all()
    })();
    written.map_err(|err| FusionError::unwritable(target, err))?;

    Ok(StagedArtifact {
        temp,
        target: target.to_path_buf(),
    })
}

/// Write a single artifact all-or-nothing
pub fn write_atomic<F>(target: &Path, write: F) -> Result<PathBuf, FusionError>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    stage(target, write)?.commit()
}

/// Commit staged artifacts in order; if one fails, the ones already committed are removed
pub fn commit_all(staged: Vec<StagedArtifact>) -> Result<Vec<PathBuf>, FusionError> {
    let mut committed: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for artifact in staged {
        match artifact.commit() {
            Ok(path) => committed.push(path),
            Err(err) => {
                for path in &committed {
                    if let Err(remove_err) = fs::remove_file(path) {
                        warn!("Failed to roll back {:?}: {}", path, remove_err);
                    }
                }
                return Err(err);
            }
        }
    }
    Ok(committed)
}
