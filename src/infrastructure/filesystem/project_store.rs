use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;

use crate::application::services::project_config_service::{
    ProjectConfigError, ProjectConfigService,
};
use crate::application::services::project_context::{ProjectContext, ProjectLoader};
use crate::common::result::WtsrcResult;
use crate::domain::entities::command_registry::CommandRegistry;
use crate::domain::entities::project_config::{ConfigWarning, ProjectConfig};
use crate::domain::entities::workspace::Workspace;

/// Loads `wtsrc.yml` from a workspace's manifest directory.
pub struct ProjectStore<'a> {
    registry: &'a CommandRegistry,
}

impl<'a> ProjectStore<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self { registry }
    }

    /// Loads the project file of `workspace`.
    ///
    /// Without a workspace, or when the file does not exist, the result is an
    /// empty configuration carrying a warning.
    pub async fn load(&self, workspace: Option<&Workspace>) -> Result<ProjectConfig, ProjectConfigError> {
        let Some(workspace) = workspace else {
            let mut config = ProjectConfig::new();
            config.warn(ConfigWarning::ProjectFileMissing { manifest_dir: None });
            return Ok(config);
        };

        let project_file = workspace.project_file_path();
        if !async_fs::try_exists(&project_file).await.unwrap_or(false) {
            let mut config = ProjectConfig::new();
            config.warn(ConfigWarning::ProjectFileMissing {
                manifest_dir: Some(workspace.manifest_dir()),
            });
            return Ok(config);
        }

        self.load_file(&project_file).await
    }

    /// Loads a project file from an explicit path, which must exist.
    pub async fn load_file(&self, path: &Path) -> Result<ProjectConfig, ProjectConfigError> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|source| ProjectConfigError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!("loaded {}", path.display());

        ProjectConfigService::new(self.registry).parse_str(&content, path)
    }
}

/// Directory hooks and actions run in for `workspace`.
pub fn hook_directory(workspace: &Workspace) -> Option<PathBuf> {
    let dir = workspace.manifest_dir();
    dir.is_dir().then_some(dir)
}

/// Finds the workspace above `start_dir` and loads its project file.
///
/// The search happens when the project is first needed, not when the loader
/// is built.
pub struct WorkspaceProjectLoader {
    registry: CommandRegistry,
    start_dir: PathBuf,
}

impl WorkspaceProjectLoader {
    pub fn new(registry: CommandRegistry, start_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            start_dir: start_dir.into(),
        }
    }
}

#[async_trait]
impl ProjectLoader for WorkspaceProjectLoader {
    async fn load(&self) -> WtsrcResult<ProjectContext> {
        let workspace = Workspace::discover(&self.start_dir);
        let config = ProjectStore::new(&self.registry)
            .load(workspace.as_ref())
            .await?;

        let Some(workspace) = workspace else {
            return Ok(ProjectContext::new(config));
        };
        tracing::debug!("workspace root: {}", workspace.root_path.display());

        let mut context = ProjectContext::new(config).with_workspace_root(&workspace.root_path);
        if let Some(dir) = hook_directory(&workspace) {
            context = context.with_hook_directory(dir);
        }
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace_with_project(content: Option<&str>) -> (TempDir, Workspace) {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Workspace::new(temp_dir.path());
        std::fs::create_dir_all(workspace.manifest_dir()).unwrap();
        if let Some(content) = content {
            std::fs::write(workspace.project_file_path(), content).unwrap();
        }
        (temp_dir, workspace)
    }

    #[tokio::test]
    async fn test_load_project_file() {
        let (_temp_dir, workspace) =
            workspace_with_project(Some("commands:\n  sync:\n    post: echo done\nactions: {}\n"));
        let registry = CommandRegistry::new();

        let config = ProjectStore::new(&registry).load(Some(&workspace)).await.unwrap();
        assert_eq!(
            config.command("sync").unwrap().post_action.as_deref(),
            Some("echo done")
        );
        assert!(config.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_missing_project_file_is_empty_with_warning() {
        let (_temp_dir, workspace) = workspace_with_project(None);
        let registry = CommandRegistry::new();

        let config = ProjectStore::new(&registry).load(Some(&workspace)).await.unwrap();
        assert!(config.is_empty());
        assert_eq!(
            config.warnings(),
            &[ConfigWarning::ProjectFileMissing {
                manifest_dir: Some(workspace.manifest_dir())
            }]
        );
    }

    #[tokio::test]
    async fn test_no_workspace_is_empty_with_warning() {
        let registry = CommandRegistry::new();
        let config = ProjectStore::new(&registry).load(None).await.unwrap();
        assert_eq!(
            config.warnings(),
            &[ConfigWarning::ProjectFileMissing { manifest_dir: None }]
        );
    }

    #[tokio::test]
    async fn test_invalid_project_file_is_fatal() {
        let (_temp_dir, workspace) = workspace_with_project(Some("commands: 5\n"));
        let registry = CommandRegistry::new();

        let error = ProjectStore::new(&registry)
            .load(Some(&workspace))
            .await
            .unwrap_err();
        assert!(matches!(error, ProjectConfigError::Schema { .. }));
    }

    #[test]
    fn test_hook_directory_requires_manifest() {
        let (_temp_dir, workspace) = workspace_with_project(None);
        assert_eq!(hook_directory(&workspace), Some(workspace.manifest_dir()));

        let empty = TempDir::new().unwrap();
        assert_eq!(hook_directory(&Workspace::new(empty.path())), None);
    }

    #[tokio::test]
    async fn test_loader_sees_workspace_created_after_construction() {
        let temp_dir = TempDir::new().unwrap();
        let loader = WorkspaceProjectLoader::new(CommandRegistry::new(), temp_dir.path());

        let before = loader.load().await.unwrap();
        assert_eq!(before.hook_directory, None);
        assert_eq!(before.workspace_root, None);
        assert_eq!(
            before.config.warnings(),
            &[ConfigWarning::ProjectFileMissing { manifest_dir: None }]
        );

        let workspace = Workspace::new(temp_dir.path());
        std::fs::create_dir_all(workspace.manifest_dir()).unwrap();
        std::fs::write(
            workspace.project_file_path(),
            "commands:\n  init:\n    post: touch cloned\nactions: {}\n",
        )
        .unwrap();

        let after = loader.load().await.unwrap();
        assert_eq!(after.hook_directory, Some(workspace.manifest_dir()));
        assert_eq!(after.workspace_root, Some(temp_dir.path().to_path_buf()));
        assert_eq!(
            after.config.command("init").unwrap().post_action.as_deref(),
            Some("touch cloned")
        );
    }
}
