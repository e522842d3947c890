use std::env;
use std::path::{Path, PathBuf};

use crate::common::error::WtsrcError;
use crate::common::result::{ResultExt, WtsrcResult};

/// Changes the process working directory and puts the previous one back when
/// dropped, including on early return and unwinding.
#[derive(Debug)]
pub struct WorkingDirGuard {
    original: PathBuf,
}

impl WorkingDirGuard {
    pub fn enter(dir: &Path) -> WtsrcResult<Self> {
        let original = env::current_dir()
            .with_filesystem_error("Cannot determine the current directory", None)?;
        env::set_current_dir(dir).map_err(|e| {
            WtsrcError::filesystem_error_with_source(
                format!("Cannot change to directory {}", dir.display()),
                Some(dir.to_path_buf()),
                e,
            )
        })?;
        tracing::debug!("entered {}", dir.display());
        Ok(Self { original })
    }

    pub fn original(&self) -> &Path {
        &self.original
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.original) {
            tracing::error!(
                "failed to restore working directory {}: {}",
                self.original.display(),
                e
            );
        }
    }
}
