use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::entities::manifest::Manifest;
use crate::domain::entities::tsrc_config::TsrcConfig;
use crate::domain::entities::workspace::Workspace;

/// Errors reading or writing tsrc's own files
#[derive(Debug, Error)]
pub enum WorkspaceStoreError {
    #[error("The tsrc {kind} file could not be found at: {path}")]
    NotFound { kind: &'static str, path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid tsrc {kind} file {path}: {source}")]
    ParseFailed {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Reads and rewrites the manifest and `.tsrc/config.yml` of a workspace.
pub struct WorkspaceStore<'a> {
    workspace: &'a Workspace,
}

impl<'a> WorkspaceStore<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    pub fn load_manifest(&self) -> Result<Manifest, WorkspaceStoreError> {
        read_yaml("manifest", &self.workspace.manifest_file_path())
    }

    pub fn save_manifest(&self, manifest: &Manifest) -> Result<(), WorkspaceStoreError> {
        write_yaml("manifest", &self.workspace.manifest_file_path(), manifest)
    }

    pub fn load_tsrc_config(&self) -> Result<TsrcConfig, WorkspaceStoreError> {
        read_yaml("config", &self.workspace.tsrc_config_path())
    }

    pub fn save_tsrc_config(&self, config: &TsrcConfig) -> Result<(), WorkspaceStoreError> {
        write_yaml("config", &self.workspace.tsrc_config_path(), config)
    }
}

fn read_yaml<T: DeserializeOwned>(kind: &'static str, path: &Path) -> Result<T, WorkspaceStoreError> {
    if !path.is_file() {
        return Err(WorkspaceStoreError::NotFound {
            kind,
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| WorkspaceStoreError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("loaded tsrc {} file {}", kind, path.display());

    serde_yaml::from_str(&content).map_err(|source| WorkspaceStoreError::ParseFailed {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Rewrites an existing file; tsrc owns creating these.
fn write_yaml<T: Serialize>(kind: &'static str, path: &Path, value: &T) -> Result<(), WorkspaceStoreError> {
    if !path.is_file() {
        return Err(WorkspaceStoreError::NotFound {
            kind,
            path: path.to_path_buf(),
        });
    }

    let yaml_content = serde_yaml::to_string(value)?;
    fs::write(path, yaml_content).map_err(|source| WorkspaceStoreError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Workspace) {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Workspace::new(temp_dir.path());
        fs::create_dir_all(workspace.manifest_dir()).unwrap();
        (temp_dir, workspace)
    }

    #[test]
    fn test_update_manifest_branch_on_disk() {
        let (_temp_dir, workspace) = workspace();
        fs::write(
            workspace.manifest_file_path(),
            "repos:\n  - dest: backend/api\n    url: git@example.com:team/api.git\n",
        )
        .unwrap();
        let store = WorkspaceStore::new(&workspace);

        let mut manifest = store.load_manifest().unwrap();
        manifest.update_branch("backend/api", "develop").unwrap();
        store.save_manifest(&manifest).unwrap();

        let reloaded = store.load_manifest().unwrap();
        assert_eq!(
            reloaded.repo("backend/api").unwrap().branch.as_deref(),
            Some("develop")
        );
    }

    #[test]
    fn test_change_tsrc_config_branch_on_disk() {
        let (_temp_dir, workspace) = workspace();
        fs::write(
            workspace.tsrc_config_path(),
            "manifest_url: git@example.com:team/manifest.git\nmanifest_branch: master\n",
        )
        .unwrap();
        let store = WorkspaceStore::new(&workspace);

        let mut config = store.load_tsrc_config().unwrap();
        config.change_branch("develop");
        store.save_tsrc_config(&config).unwrap();

        assert_eq!(store.load_tsrc_config().unwrap().manifest_branch(), Some("develop"));
    }

    #[test]
    fn test_missing_files() {
        let (_temp_dir, workspace) = workspace();
        let store = WorkspaceStore::new(&workspace);

        let error = store.load_manifest().unwrap_err();
        assert!(error
            .to_string()
            .starts_with("The tsrc manifest file could not be found at:"));

        let error = store.save_tsrc_config(&TsrcConfig::default()).unwrap_err();
        assert!(matches!(error, WorkspaceStoreError::NotFound { kind: "config", .. }));
        assert!(!workspace.tsrc_config_path().exists());
    }

    #[test]
    fn test_invalid_manifest() {
        let (_temp_dir, workspace) = workspace();
        fs::write(workspace.manifest_file_path(), "repos: 5\n").unwrap();

        let error = WorkspaceStore::new(&workspace).load_manifest().unwrap_err();
        assert!(matches!(error, WorkspaceStoreError::ParseFailed { .. }));
    }
}
