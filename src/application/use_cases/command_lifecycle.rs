use colored::Colorize;
use std::fmt;
use std::future::Future;

use crate::application::services::action_resolver::ActionResolver;
use crate::application::services::project_context::{LazyProject, ProjectContext};
use crate::common::error::WtsrcError;
use crate::common::result::WtsrcResult;
use crate::common::working_dir::WorkingDirGuard;
use crate::domain::entities::command_registry::CommandRegistry;
use crate::domain::value_objects::hook_stage::HookStage;
use crate::infrastructure::process::command_runner::{CommandRunner, ExecutionConfig};

/// Name of the invoked wtsrc command, exported to hooks
pub const ENV_COMMAND: &str = "WTSRC_COMMAND";
/// `pre` or `post`, exported to hooks
pub const ENV_HOOK: &str = "WTSRC_HOOK";
/// Workspace root, exported to hooks when known
pub const ENV_WORKSPACE_ROOT: &str = "WTSRC_WORKSPACE_ROOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    PreHook,
    CommandBody,
    PostHook,
    Done,
    Aborted,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Idle => "idle",
            LifecycleState::PreHook => "pre-hook",
            LifecycleState::CommandBody => "command",
            LifecycleState::PostHook => "post-hook",
            LifecycleState::Done => "done",
            LifecycleState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// What happened during one command invocation.
#[derive(Debug)]
pub struct LifecycleReport {
    pub command: String,

    /// Every state visited, starting with `Idle`
    pub trace: Vec<LifecycleState>,

    /// Pre-action text handed to the runner, if any
    pub pre_action: Option<String>,

    /// Post-action text handed to the runner, if any
    pub post_action: Option<String>,

    /// Why the invocation ended in `Aborted`
    pub failure: Option<WtsrcError>,
}

impl LifecycleReport {
    fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            trace: vec![LifecycleState::Idle],
            pre_action: None,
            post_action: None,
            failure: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.trace.last().copied().unwrap_or(LifecycleState::Idle)
    }

    pub fn succeeded(&self) -> bool {
        self.state() == LifecycleState::Done
    }

    fn enter(&mut self, state: LifecycleState) {
        tracing::debug!("{}: {}", self.command, state);
        self.trace.push(state);
    }

    fn abort(mut self, error: WtsrcError) -> Self {
        self.enter(LifecycleState::Aborted);
        self.failure = Some(error);
        self
    }

    /// The report on success, the abort reason otherwise.
    pub fn into_result(mut self) -> WtsrcResult<Self> {
        match self.failure.take() {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }
}

/// Wraps a command body with its configured pre- and post-actions.
///
/// Hooks run one at a time in the directory that holds `wtsrc.yml`; the
/// previous working directory is restored whatever the hook's outcome. The
/// project is only loaded once a hook the command supports is looked up, so
/// a post-only command sees the workspace its body created.
pub struct CommandLifecycle<'a, R: CommandRunner + ?Sized> {
    registry: &'a CommandRegistry,
    project: &'a LazyProject,
    runner: &'a R,
    verbose: bool,
}

impl<'a, R: CommandRunner + ?Sized> CommandLifecycle<'a, R> {
    pub fn new(registry: &'a CommandRegistry, project: &'a LazyProject, runner: &'a R) -> Self {
        Self {
            registry,
            project,
            runner,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Runs `name` through the full lifecycle and fails when it aborts.
    pub async fn invoke<F, Fut>(&self, name: &str, body: F) -> WtsrcResult<LifecycleReport>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = WtsrcResult<()>>,
    {
        self.run(name, body).await?.into_result()
    }

    /// Runs `name` through the full lifecycle.
    ///
    /// An unknown command name, or a project that fails to load before the
    /// body, is returned as an error; nothing has run at that point. Every
    /// other failure ends the report in `Aborted` with the reason attached.
    pub async fn run<F, Fut>(&self, name: &str, body: F) -> WtsrcResult<LifecycleReport>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = WtsrcResult<()>>,
    {
        if !self.registry.is_known_command(name) {
            return Err(WtsrcError::unknown_command(name));
        }

        let mut report = LifecycleReport::new(name);

        if self.registry.pre_action_allowed_for(name) {
            let project = self.project.get().await?;
            let resolver = ActionResolver::new(&project.config, self.registry);
            if let Some(action) = resolver.runnable_pre_action(name) {
                report.enter(LifecycleState::PreHook);
                report.pre_action = Some(action.to_string());
                if let Err(error) = self.run_hook(project, name, HookStage::Pre, action).await {
                    return Ok(report.abort(error));
                }
            }
        }

        report.enter(LifecycleState::CommandBody);
        if let Err(error) = body().await {
            return Ok(report.abort(error));
        }

        if self.registry.post_action_allowed_for(name) {
            let project = match self.project.get().await {
                Ok(project) => project,
                Err(error) => return Ok(report.abort(error)),
            };
            let resolver = ActionResolver::new(&project.config, self.registry);
            if let Some(action) = resolver.runnable_post_action(name) {
                report.enter(LifecycleState::PostHook);
                report.post_action = Some(action.to_string());
                if let Err(error) = self.run_hook(project, name, HookStage::Post, action).await {
                    return Ok(report.abort(error));
                }
            }
        }

        report.enter(LifecycleState::Done);
        if self.verbose {
            println!("{}", "WTSRC OK".green());
        }
        Ok(report)
    }

    async fn run_hook(
        &self,
        project: &ProjectContext,
        name: &str,
        stage: HookStage,
        action: &str,
    ) -> WtsrcResult<()> {
        let _guard = match &project.hook_directory {
            Some(dir) => Some(WorkingDirGuard::enter(dir)?),
            None => None,
        };

        let mut config = ExecutionConfig::interactive()
            .with_environment_variable(ENV_COMMAND, name)
            .with_environment_variable(ENV_HOOK, stage.as_str());
        if let Some(root) = &project.workspace_root {
            config = config.with_environment_variable(ENV_WORKSPACE_ROOT, root.display().to_string());
        }

        tracing::info!("running {}-action for '{}'", stage, name);
        let result = self.runner.run(action, &config).await?;
        if !result.success() {
            tracing::error!("{}-action failed with exit code {}", stage, result.exit_code);
            return Err(WtsrcError::hook_failed(stage, name, action, result.exit_code));
        }
        Ok(())
    }
}
