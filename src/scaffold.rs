use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fs::FileSystem;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("file '{}' already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    #[error("could not create directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// 親ディレクトリを作成してからページファイルを書き込む
pub fn create_page_file(
    fs: &dyn FileSystem,
    target_path: &Path,
    contents: &str,
    overwrite: bool,
) -> Result<(), ScaffoldError> {
    if !overwrite && fs.exists(target_path) {
        return Err(ScaffoldError::AlreadyExists(target_path.to_path_buf()));
    }

    if let Some(dir) = target_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(dir)
            .map_err(|source| ScaffoldError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
    }

    fs.write(target_path, contents.as_bytes())
        .map_err(|source| ScaffoldError::Write {
            path: target_path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %target_path.display(), bytes = contents.len(), "page file written");
    Ok(())
}
