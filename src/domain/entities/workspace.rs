use std::path::{Path, PathBuf};

use crate::common::settings::{
    MANIFEST_DIRECTORY, MANIFEST_FILE, PROJECT_FILE, TSRC_CONFIG_FILE, TSRC_DIRECTORY,
};

/// On-disk layout of a tsrc workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Directory holding `.tsrc`
    pub root_path: PathBuf,
}

impl Workspace {
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
        }
    }

    /// `.tsrc` directory
    pub fn tsrc_dir(&self) -> PathBuf {
        self.root_path.join(TSRC_DIRECTORY)
    }

    /// Local clone of the manifest repository; anchors `wtsrc.yml`
    pub fn manifest_dir(&self) -> PathBuf {
        self.tsrc_dir().join(MANIFEST_DIRECTORY)
    }

    pub fn project_file_path(&self) -> PathBuf {
        self.manifest_dir().join(PROJECT_FILE)
    }

    pub fn manifest_file_path(&self) -> PathBuf {
        self.manifest_dir().join(MANIFEST_FILE)
    }

    /// tsrc's own workspace settings (`.tsrc/config.yml`)
    pub fn tsrc_config_path(&self) -> PathBuf {
        self.tsrc_dir().join(TSRC_CONFIG_FILE)
    }

    pub fn repo_path(&self, dest: &str) -> PathBuf {
        self.root_path.join(dest)
    }

    /// Walks up from `start_path` to the first directory containing `.tsrc`.
    pub fn discover(start_path: &Path) -> Option<Self> {
        start_path
            .ancestors()
            .find(|dir| dir.join(TSRC_DIRECTORY).is_dir())
            .map(Self::new)
    }
}
