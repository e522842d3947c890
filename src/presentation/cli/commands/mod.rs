pub mod action;
pub mod alias;
pub mod manifest;
pub mod project;
pub mod repo;
pub mod tsrc;

pub use action::ActionCommand;
pub use alias::{AddAliasCommand, ListAliasesCommand, RemoveAliasCommand};
pub use manifest::{ManifestBranchCommand, SetBranchCommand, ShowManifestCommand};
pub use project::ProjectCommand;
pub use repo::RepoCommand;
pub use tsrc::{InitOptions, TsrcCommand};

use crate::common::error::WtsrcError;
use crate::common::result::{OptionExt, WtsrcResult};
use crate::domain::entities::workspace::Workspace;
use crate::infrastructure::process::command_runner::{CommandRunner, ExecutionConfig};

/// Runs `command` interactively and turns a non-zero exit into an error.
pub(crate) async fn run_checked(
    runner: &dyn CommandRunner,
    command: &str,
    config: &ExecutionConfig,
) -> WtsrcResult<()> {
    let result = runner.run(command, config).await?;
    if !result.success() {
        return Err(WtsrcError::command_failed(command, result.exit_code));
    }
    Ok(())
}

/// The workspace, or the error for commands run outside one.
pub(crate) fn require_workspace(workspace: Option<&Workspace>) -> WtsrcResult<&Workspace> {
    workspace.ok_or_wtsrc(WtsrcError::workspace_error(
        "You must call from within a tsrc directory",
        None,
    ))
}

/// Quotes a user-supplied argument for the platform shell.
pub(crate) fn shell_quote(arg: &str) -> String {
    let is_plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./_-~".contains(c));
    if is_plain {
        arg.to_string()
    } else if cfg!(target_os = "windows") {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}
