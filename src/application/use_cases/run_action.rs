use std::path::PathBuf;

use crate::application::services::action_resolver::ActionResolver;
use crate::common::error::WtsrcError;
use crate::common::result::WtsrcResult;
use crate::common::working_dir::WorkingDirGuard;
use crate::domain::entities::command_registry::CommandRegistry;
use crate::domain::entities::project_config::ProjectConfig;
use crate::infrastructure::process::command_runner::{
    CommandRunner, ExecutionConfig, ExecutionMode, ExecutionResult,
};

/// Runs a named action from the project configuration.
pub struct RunActionUseCase<'a, R: CommandRunner + ?Sized> {
    project: &'a ProjectConfig,
    registry: &'a CommandRegistry,
    runner: &'a R,
    working_directory: Option<PathBuf>,
    mode: ExecutionMode,
}

impl<'a, R: CommandRunner + ?Sized> RunActionUseCase<'a, R> {
    pub fn new(project: &'a ProjectConfig, registry: &'a CommandRegistry, runner: &'a R) -> Self {
        Self {
            project,
            registry,
            runner,
            working_directory: None,
            mode: ExecutionMode::Interactive,
        }
    }

    /// Directory the action runs in, normally the manifest directory
    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fails when the action is not defined or exits non-zero.
    pub async fn execute(&self, name: &str) -> WtsrcResult<ExecutionResult> {
        let action = ActionResolver::new(self.project, self.registry)
            .get_action(name)
            .ok_or_else(|| WtsrcError::unknown_action(name))?;

        let _guard = match &self.working_directory {
            Some(dir) => Some(WorkingDirGuard::enter(dir)?),
            None => None,
        };

        tracing::info!("running action '{}'", name);
        let config = ExecutionConfig::new().with_mode(self.mode);
        let result = self.runner.run(action, &config).await?;

        if !result.success() {
            return Err(WtsrcError::command_failed(action, result.exit_code));
        }
        Ok(result)
    }
}
