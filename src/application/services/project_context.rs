use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::OnceCell;

use crate::common::result::WtsrcResult;
use crate::domain::entities::project_config::ProjectConfig;

/// A loaded project configuration and where its hooks run.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    pub config: ProjectConfig,

    /// Directory hooks and actions run in; the caller's directory when unset
    pub hook_directory: Option<PathBuf>,

    /// Exported to hooks when known
    pub workspace_root: Option<PathBuf>,
}

impl ProjectContext {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            config,
            hook_directory: None,
            workspace_root: None,
        }
    }

    pub fn with_hook_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.hook_directory = Some(dir.into());
        self
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }
}

/// Produces the project context for the current invocation.
#[async_trait]
pub trait ProjectLoader: Send + Sync {
    async fn load(&self) -> WtsrcResult<ProjectContext>;
}

/// Project configuration loaded on first access and kept afterwards.
///
/// A command that creates the workspace (`init`) must not have its project
/// resolved before it runs, so nothing is read until someone asks.
pub struct LazyProject {
    loader: Option<Box<dyn ProjectLoader>>,
    cell: OnceCell<ProjectContext>,
}

impl LazyProject {
    pub fn new(loader: impl ProjectLoader + 'static) -> Self {
        Self {
            loader: Some(Box::new(loader)),
            cell: OnceCell::new(),
        }
    }

    pub fn loaded(context: ProjectContext) -> Self {
        Self {
            loader: None,
            cell: OnceCell::new_with(Some(context)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// The project context, loading it if this is the first access.
    /// A failed load is not cached.
    pub async fn get(&self) -> WtsrcResult<&ProjectContext> {
        self.cell
            .get_or_try_init(|| async {
                match &self.loader {
                    Some(loader) => loader.load().await,
                    None => Ok(ProjectContext::default()),
                }
            })
            .await
    }
}
