use super::{run_checked, shell_quote};
use crate::common::result::WtsrcResult;
use crate::infrastructure::process::command_runner::{CommandRunner, ExecutionConfig};

/// Options forwarded to `tsrc init`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOptions {
    pub branch: Option<String>,
    pub group: Option<String>,
    pub shallow: bool,
}

/// Workspace-wide commands delegated to tsrc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsrcCommand {
    Init { manifest_url: String, options: InitOptions },
    Sync,
    Status,
    StatusAll,
    Diff,
    Clean,
    Reset,
}

impl TsrcCommand {
    /// Shell command line for this command, `program` standing for tsrc.
    pub fn command_line(&self, program: &str) -> String {
        match self {
            TsrcCommand::Init {
                manifest_url,
                options,
            } => {
                let mut line = format!("{} init {}", program, shell_quote(manifest_url));
                if let Some(branch) = &options.branch {
                    line.push_str(&format!(" --branch {}", shell_quote(branch)));
                }
                if let Some(group) = &options.group {
                    line.push_str(&format!(" --group {}", shell_quote(group)));
                }
                if options.shallow {
                    line.push_str(" -s");
                }
                line
            }
            TsrcCommand::Sync => format!("{} sync", program),
            TsrcCommand::Status => format!("{} status", program),
            TsrcCommand::StatusAll => format!("{} foreach git status", program),
            TsrcCommand::Diff => format!("{} foreach git diff-index HEAD", program),
            TsrcCommand::Clean => format!("{} foreach -- git clean -df", program),
            TsrcCommand::Reset => format!("{} foreach -- git reset --hard HEAD", program),
        }
    }

    pub async fn execute(&self, program: &str, runner: &dyn CommandRunner) -> WtsrcResult<()> {
        run_checked(runner, &self.command_line(program), &ExecutionConfig::interactive()).await
    }
}
