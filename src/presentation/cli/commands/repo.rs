use std::path::PathBuf;

use super::{require_workspace, run_checked, shell_quote};
use crate::common::error::WtsrcError;
use crate::common::result::WtsrcResult;
use crate::domain::entities::workspace::Workspace;
use crate::infrastructure::process::command_runner::{CommandRunner, ExecutionConfig};

/// git commands run inside a single repository of the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCommand {
    Status { repo_path: String },
    Merge { repo_path: String, branch: String },
    Mergetool { repo_path: String },
}

impl RepoCommand {
    pub fn repo_path(&self) -> &str {
        match self {
            RepoCommand::Status { repo_path }
            | RepoCommand::Merge { repo_path, .. }
            | RepoCommand::Mergetool { repo_path } => repo_path,
        }
    }

    pub fn command_line(&self) -> String {
        match self {
            RepoCommand::Status { .. } => "git status".to_string(),
            RepoCommand::Merge { branch, .. } => format!("git merge {}", shell_quote(branch)),
            RepoCommand::Mergetool { .. } => "git mergetool".to_string(),
        }
    }

    pub async fn execute(
        &self,
        workspace: Option<&Workspace>,
        runner: &dyn CommandRunner,
    ) -> WtsrcResult<()> {
        let repo_dir = resolve_repo(workspace, self.repo_path())?;
        let config = ExecutionConfig::interactive().with_working_directory(&repo_dir);
        run_checked(runner, &self.command_line(), &config).await
    }
}

/// Directory of `repo_path` below the workspace root; it must exist.
pub fn resolve_repo(workspace: Option<&Workspace>, repo_path: &str) -> WtsrcResult<PathBuf> {
    let workspace = require_workspace(workspace)?;

    let dir = workspace.repo_path(repo_path);
    if !dir.is_dir() {
        return Err(WtsrcError::workspace_error(
            format!("The repo path '{}' was not found", repo_path),
            Some(workspace.root_path.clone()),
        ));
    }
    Ok(dir)
}
