use super::require_workspace;
use crate::common::result::WtsrcResult;
use crate::domain::entities::workspace::Workspace;
use crate::infrastructure::filesystem::workspace_store::WorkspaceStore;

/// Handler for the manifest command
pub struct ShowManifestCommand;

impl ShowManifestCommand {
    pub fn execute(&self, workspace: Option<&Workspace>) -> WtsrcResult<()> {
        let workspace = require_workspace(workspace)?;
        let manifest = WorkspaceStore::new(workspace).load_manifest()?;
        print!("{}", manifest);
        Ok(())
    }
}

/// Handler for the set-branch command: points one manifest repo at a branch.
pub struct SetBranchCommand {
    pub repo_path: String,
    pub branch: String,
}

impl SetBranchCommand {
    pub fn new(repo_path: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            repo_path: repo_path.into(),
            branch: branch.into(),
        }
    }

    pub fn execute(&self, workspace: Option<&Workspace>) -> WtsrcResult<()> {
        let store = WorkspaceStore::new(require_workspace(workspace)?);
        let mut manifest = store.load_manifest()?;
        manifest.update_branch(&self.repo_path, &self.branch)?;
        store.save_manifest(&manifest)?;
        println!("{} => {}", self.repo_path, self.branch);
        Ok(())
    }
}

/// Handler for the manifest-branch command
///
/// Prints the branch tsrc follows for the manifest, or changes it in
/// `.tsrc/config.yml` when a branch is given.
pub struct ManifestBranchCommand {
    pub branch: Option<String>,
}

impl ManifestBranchCommand {
    pub fn new(branch: Option<String>) -> Self {
        Self { branch }
    }

    pub fn execute(&self, workspace: Option<&Workspace>) -> WtsrcResult<()> {
        let store = WorkspaceStore::new(require_workspace(workspace)?);
        let mut config = store.load_tsrc_config()?;

        if let Some(branch) = &self.branch {
            config.change_branch(branch.as_str());
            store.save_tsrc_config(&config)?;
            tracing::info!("manifest branch changed to '{}'", branch);
        }
        println!("{}", config.manifest_branch().unwrap_or("(default)"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::WtsrcError;
    use std::fs;
    use tempfile::TempDir;

    fn workspace_with_manifest() -> (TempDir, Workspace) {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Workspace::new(temp_dir.path());
        fs::create_dir_all(workspace.manifest_dir()).unwrap();
        fs::write(
            workspace.manifest_file_path(),
            "repos:\n  - dest: backend/api\n    url: git@example.com:team/api.git\n",
        )
        .unwrap();
        fs::write(workspace.tsrc_config_path(), "manifest_branch: master\n").unwrap();
        (temp_dir, workspace)
    }

    #[test]
    fn test_set_branch() {
        let (_temp_dir, workspace) = workspace_with_manifest();

        SetBranchCommand::new("backend/api", "develop")
            .execute(Some(&workspace))
            .unwrap();

        let manifest = WorkspaceStore::new(&workspace).load_manifest().unwrap();
        assert_eq!(
            manifest.repo("backend/api").unwrap().branch.as_deref(),
            Some("develop")
        );
    }

    #[test]
    fn test_set_branch_of_unknown_repo() {
        let (_temp_dir, workspace) = workspace_with_manifest();
        let before = fs::read_to_string(workspace.manifest_file_path()).unwrap();

        let error = SetBranchCommand::new("frontend", "develop")
            .execute(Some(&workspace))
            .unwrap_err();
        assert!(matches!(error, WtsrcError::Manifest(_)));
        assert_eq!(fs::read_to_string(workspace.manifest_file_path()).unwrap(), before);
    }

    #[test]
    fn test_manifest_branch() {
        let (_temp_dir, workspace) = workspace_with_manifest();
        let store = WorkspaceStore::new(&workspace);

        ManifestBranchCommand::new(None).execute(Some(&workspace)).unwrap();
        assert_eq!(store.load_tsrc_config().unwrap().manifest_branch(), Some("master"));

        ManifestBranchCommand::new(Some("develop".to_string()))
            .execute(Some(&workspace))
            .unwrap();
        assert_eq!(store.load_tsrc_config().unwrap().manifest_branch(), Some("develop"));
    }

    #[test]
    fn test_manifest_commands_need_a_workspace() {
        let error = ShowManifestCommand.execute(None).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Workspace error: You must call from within a tsrc directory"
        );
        assert!(ManifestBranchCommand::new(None).execute(None).is_err());
    }
}
