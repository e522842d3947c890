pub mod commands;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::env;
use std::path::PathBuf;

use crate::application::services::project_context::LazyProject;
use crate::application::use_cases::command_lifecycle::CommandLifecycle;
use crate::common::error::WtsrcError;
use crate::common::logging::init_logging;
use crate::common::result::WtsrcResult;
use crate::common::settings::Settings;
use crate::domain::entities::command_registry::CommandRegistry;
use crate::domain::entities::workspace::Workspace;
use crate::domain::value_objects::hook_stage::HookSupport;
use crate::infrastructure::filesystem::alias_store::AliasStore;
use crate::infrastructure::filesystem::project_store::WorkspaceProjectLoader;
use crate::infrastructure::process::command_runner::{CommandRunner, ShellCommandRunner};

use commands::alias::resolve_alias;
use commands::{
    ActionCommand, AddAliasCommand, InitOptions, ListAliasesCommand, ManifestBranchCommand,
    ProjectCommand, RemoveAliasCommand, RepoCommand, SetBranchCommand, ShowManifestCommand,
    TsrcCommand,
};

/// Output format options for the project command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Hooks each command supports. Commands not listed support both.
pub const HOOK_SUPPORT: &[(&str, HookSupport)] = &[
    ("init", HookSupport::PostOnly),
    ("init-alias", HookSupport::PostOnly),
    ("add-alias", HookSupport::None),
    ("remove-alias", HookSupport::None),
    ("aliases", HookSupport::None),
];

/// wtsrc - tsrc with per-project hooks, actions and manifest aliases
#[derive(Parser, Debug)]
#[command(name = "wtsrc")]
#[command(about = "tsrc with per-project hooks, actions and manifest aliases")]
#[command(version, long_version = long_version())]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "WTSRC_VERBOSE")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Alias registry file (defaults to ~/.wtsrcdata.yml)
    #[arg(long, global = true, env = "WTSRC_ALIAS_FILE")]
    pub alias_file: Option<PathBuf>,

    /// Program invoked for tsrc commands
    #[arg(long, global = true, env = "WTSRC_TSRC")]
    pub tsrc: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone the manifest and all repos
    Init {
        /// URL of the manifest repository
        manifest_url: String,

        #[command(flatten)]
        options: InitArgs,
    },

    /// Clone the manifest and all repos by its alias
    InitAlias {
        alias: String,

        #[command(flatten)]
        options: InitArgs,
    },

    /// Register a manifest URL under an alias
    AddAlias {
        alias: String,

        /// The url for the manifest repository
        #[arg(short, long)]
        url: String,
    },

    /// Remove an alias
    RemoveAlias { alias: String },

    /// Print the registered aliases
    Aliases,

    /// Synchronize all repositories
    Sync,

    /// Show the status of a repo at the given path, or 'all'
    Status { repo_path: Option<String> },

    /// Show which files have been modified
    Diff,

    /// Delete all local files that are not under version control
    Clean,

    /// Discard all uncommitted changes
    Reset,

    /// Merge a branch into a repo
    Merge { repo_path: String, branch: String },

    /// Open the merge tool for a repo
    Mergetool { repo_path: String },

    /// Print the repos of the tsrc manifest
    Manifest,

    /// Set the branch of a repo in the tsrc manifest
    SetBranch { repo_path: String, branch: String },

    /// Show the manifest branch tsrc follows, or change it
    ManifestBranch { branch: Option<String> },

    /// Run an action defined in wtsrc.yml
    Action {
        name: String,

        /// Print the action's output after it finishes instead of streaming it
        #[arg(long)]
        capture: bool,
    },

    /// Show the loaded project configuration
    Project {
        /// Output format (text, json, yaml)
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    /// Which branch to clone (default branch when omitted)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Which group to clone (all repos when omitted)
    #[arg(short, long)]
    pub group: Option<String>,

    /// Make a shallow copy
    #[arg(short = 's', long)]
    pub shallow: bool,
}

impl From<&InitArgs> for InitOptions {
    fn from(args: &InitArgs) -> Self {
        InitOptions {
            branch: args.branch.clone(),
            group: args.group.clone(),
            shallow: args.shallow,
        }
    }
}

impl Commands {
    /// Command name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::InitAlias { .. } => "init-alias",
            Commands::AddAlias { .. } => "add-alias",
            Commands::RemoveAlias { .. } => "remove-alias",
            Commands::Aliases => "aliases",
            Commands::Sync => "sync",
            Commands::Status { .. } => "status",
            Commands::Diff => "diff",
            Commands::Clean => "clean",
            Commands::Reset => "reset",
            Commands::Merge { .. } => "merge",
            Commands::Mergetool { .. } => "mergetool",
            Commands::Manifest => "manifest",
            Commands::SetBranch { .. } => "set-branch",
            Commands::ManifestBranch { .. } => "manifest-branch",
            Commands::Action { .. } => "action",
            Commands::Project { .. } => "project",
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("GIT_HASH"),
        " ",
        env!("BUILD_DATE"),
        " ",
        env!("BUILD_TARGET"),
        ")"
    )
}

/// Registry of every subcommand with the hooks it supports.
pub fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::authoritative();
    for subcommand in Cli::command().get_subcommands() {
        let name = subcommand.get_name();
        let support = HOOK_SUPPORT
            .iter()
            .find(|(command, _)| *command == name)
            .map(|(_, support)| *support)
            .unwrap_or_default();
        registry.register_command(name, support);
    }
    registry
}

/// Everything a command body needs for one invocation. The project file is
/// read on first use.
struct InvocationContext {
    settings: Settings,
    current_dir: PathBuf,
    registry: CommandRegistry,
    project: LazyProject,
    runner: ShellCommandRunner,
}

impl InvocationContext {
    fn workspace(&self) -> Option<Workspace> {
        Workspace::discover(&self.current_dir)
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    /// Runs the invoked command and returns the process exit code.
    pub async fn run(self) -> i32 {
        if self.cli.no_color {
            colored::control::set_override(false);
        }
        init_logging(self.cli.verbose, self.cli.no_color);

        match self.handle_command().await {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("{} {:#}", "Fatal Error:".red().bold(), e);
                e.downcast_ref::<WtsrcError>()
                    .map_or(1, WtsrcError::exit_code)
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        if let Some(dir) = &self.cli.directory {
            env::set_current_dir(dir)
                .with_context(|| format!("Cannot change to directory {}", dir.display()))?;
        }

        let context = self.build_context()?;
        let name = self.cli.command.name();

        CommandLifecycle::new(&context.registry, &context.project, &context.runner)
            .with_verbose(context.settings.verbose)
            .invoke(name, || self.execute_body(&context))
            .await?;
        Ok(())
    }

    fn build_context(&self) -> WtsrcResult<InvocationContext> {
        let settings = Settings::new(
            self.cli.alias_file.clone(),
            self.cli.tsrc.clone(),
            self.cli.verbose,
        );
        let current_dir = env::current_dir()?;
        let registry = build_registry();
        let project = LazyProject::new(WorkspaceProjectLoader::new(
            registry.clone(),
            current_dir.clone(),
        ));

        Ok(InvocationContext {
            settings,
            current_dir,
            registry,
            project,
            runner: ShellCommandRunner::new(),
        })
    }

    async fn execute_body(&self, context: &InvocationContext) -> WtsrcResult<()> {
        let runner: &dyn CommandRunner = &context.runner;
        let program = context.settings.tsrc_program.as_str();
        let alias_store = AliasStore::new(&context.settings.alias_file);

        match &self.cli.command {
            Commands::Init {
                manifest_url,
                options,
            } => {
                TsrcCommand::Init {
                    manifest_url: manifest_url.clone(),
                    options: options.into(),
                }
                .execute(program, runner)
                .await
            }
            Commands::InitAlias { alias, options } => {
                let manifest_url = resolve_alias(&alias_store, alias)?;
                TsrcCommand::Init {
                    manifest_url,
                    options: options.into(),
                }
                .execute(program, runner)
                .await
            }
            Commands::AddAlias { alias, url } => {
                AddAliasCommand::new(alias.as_str(), url.as_str()).execute(&alias_store)
            }
            Commands::RemoveAlias { alias } => {
                RemoveAliasCommand::new(alias.as_str()).execute(&alias_store)
            }
            Commands::Aliases => ListAliasesCommand.execute(&alias_store),
            Commands::Sync => TsrcCommand::Sync.execute(program, runner).await,
            Commands::Status { repo_path } => match repo_path.as_deref() {
                None => TsrcCommand::Status.execute(program, runner).await,
                Some("all") => TsrcCommand::StatusAll.execute(program, runner).await,
                Some(repo_path) => {
                    RepoCommand::Status {
                        repo_path: repo_path.to_string(),
                    }
                    .execute(context.workspace().as_ref(), runner)
                    .await
                }
            },
            Commands::Diff => TsrcCommand::Diff.execute(program, runner).await,
            Commands::Clean => TsrcCommand::Clean.execute(program, runner).await,
            Commands::Reset => TsrcCommand::Reset.execute(program, runner).await,
            Commands::Merge { repo_path, branch } => {
                RepoCommand::Merge {
                    repo_path: repo_path.clone(),
                    branch: branch.clone(),
                }
                .execute(context.workspace().as_ref(), runner)
                .await
            }
            Commands::Mergetool { repo_path } => {
                RepoCommand::Mergetool {
                    repo_path: repo_path.clone(),
                }
                .execute(context.workspace().as_ref(), runner)
                .await
            }
            Commands::Manifest => ShowManifestCommand.execute(context.workspace().as_ref()),
            Commands::SetBranch { repo_path, branch } => {
                SetBranchCommand::new(repo_path.as_str(), branch.as_str())
                    .execute(context.workspace().as_ref())
            }
            Commands::ManifestBranch { branch } => {
                ManifestBranchCommand::new(branch.clone()).execute(context.workspace().as_ref())
            }
            Commands::Action { name, capture } => {
                let project = context.project.get().await?;
                ActionCommand::new(name.as_str(), *capture)
                    .with_working_directory(project.hook_directory.clone())
                    .execute(&project.config, &context.registry, runner)
                    .await
            }
            Commands::Project { output } => {
                let project = context.project.get().await?;
                ProjectCommand::new(*output).execute(&project.config)
            }
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
