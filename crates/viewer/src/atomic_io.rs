use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub(crate) enum OutputWriteError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to stage {path}: {source}")]
    Stage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to replace {path}: {source}")]
    Replace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes a viewer output (paint list or preview) through a sibling
/// `.tmp` file, so an interrupted run leaves the previous output intact.
pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> Result<(), OutputWriteError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputWriteError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let staged = staging_path(path);
    fs::write(&staged, bytes).map_err(|source| OutputWriteError::Stage {
        path: staged.clone(),
        source,
    })?;
    promote(&staged, path).map_err(|source| {
        let _ = fs::remove_file(&staged);
        OutputWriteError::Replace {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "output_written");
    Ok(())
}

fn promote(staged: &Path, target: &Path) -> io::Result<()> {
    match fs::remove_file(target) {
        Err(error) if error.kind() != io::ErrorKind::NotFound => return Err(error),
        _ => {}
    }
    fs::rename(staged, target)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "viewer-output".into());
    name.push(".tmp");
    path.with_file_name(name)
}
