use std::path::PathBuf;

use crate::application::use_cases::run_action::RunActionUseCase;
use crate::common::result::WtsrcResult;
use crate::domain::entities::command_registry::CommandRegistry;
use crate::domain::entities::project_config::ProjectConfig;
use crate::infrastructure::process::command_runner::{CommandRunner, ExecutionMode};

/// Handler for the action command
pub struct ActionCommand {
    pub name: String,
    /// Collect the action's output and print it once it finishes
    pub capture: bool,
    pub working_directory: Option<PathBuf>,
}

impl ActionCommand {
    pub fn new(name: impl Into<String>, capture: bool) -> Self {
        Self {
            name: name.into(),
            capture,
            working_directory: None,
        }
    }

    pub fn with_working_directory(mut self, dir: Option<PathBuf>) -> Self {
        self.working_directory = dir;
        self
    }

    pub async fn execute(
        &self,
        project: &ProjectConfig,
        registry: &CommandRegistry,
        runner: &dyn CommandRunner,
    ) -> WtsrcResult<()> {
        let mode = if self.capture {
            ExecutionMode::Captured
        } else {
            ExecutionMode::Interactive
        };

        let mut use_case = RunActionUseCase::new(project, registry, runner).with_mode(mode);
        if let Some(dir) = &self.working_directory {
            use_case = use_case.with_working_directory(dir);
        }

        let result = use_case.execute(&self.name).await?;
        if self.capture {
            print!("{}", result.stdout);
            eprint!("{}", result.stderr);
        }
        Ok(())
    }
}
