use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::common::settings::PROJECT_FILE;
use crate::domain::entities::command_registry::CommandRegistry;
use crate::domain::value_objects::hook_stage::HookStage;

/// Structural errors in a project configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectModelError {
    #[error("'{0}' command is defined in wtsrc.yml more than once")]
    DuplicateCommand(String),

    #[error("'{0}' action is defined in wtsrc.yml more than once")]
    DuplicateAction(String),
}

/// Advisory diagnostics collected while loading. None of them stop a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    MissingSection { section: &'static str },
    UnknownCommand { name: String },
    UnreachableHook { name: String, stage: HookStage },
    ProjectFileMissing { manifest_dir: Option<PathBuf> },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::MissingSection { section } => {
                write!(f, "'{}' section not found in {} file", section, PROJECT_FILE)
            }
            ConfigWarning::UnknownCommand { name } => write!(
                f,
                "{} defines hooks for command '{}' that is not a wtsrc command",
                PROJECT_FILE, name
            ),
            ConfigWarning::UnreachableHook { name, stage } => write!(
                f,
                "{} defines a {}-action for command '{}' that cannot be executed by wtsrc",
                PROJECT_FILE, stage, name
            ),
            ConfigWarning::ProjectFileMissing {
                manifest_dir: Some(dir),
            } => write!(
                f,
                "The wtsrc project file could not be found at: {}",
                dir.display()
            ),
            ConfigWarning::ProjectFileMissing { manifest_dir: None } => write!(
                f,
                "The wtsrc project file could not be found; you probably are not calling from within a tsrc project directory"
            ),
        }
    }
}

/// Hooks bound to one wtsrc command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandHooks {
    #[serde(skip)]
    pub name: String,

    #[serde(rename = "pre", skip_serializing_if = "Option::is_none")]
    pub pre_action: Option<String>,

    #[serde(rename = "post", skip_serializing_if = "Option::is_none")]
    pub post_action: Option<String>,
}

impl CommandHooks {
    pub fn new(
        name: impl Into<String>,
        pre_action: Option<String>,
        post_action: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pre_action,
            post_action,
        }
    }

    pub fn action_for(&self, stage: HookStage) -> Option<&str> {
        match stage {
            HookStage::Pre => self.pre_action.as_deref(),
            HookStage::Post => self.post_action.as_deref(),
        }
    }
}

impl fmt::Display for CommandHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, " - pre:  {}", self.pre_action.as_deref().unwrap_or("None"))?;
        write!(f, " - post: {}", self.post_action.as_deref().unwrap_or("None"))
    }
}

/// A named standalone action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    #[serde(skip)]
    pub name: String,

    pub action: String,

    /// Documentation only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Action {
    pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        write!(f, " - action:  {}", self.action)?;
        if let Some(comment) = &self.comment {
            write!(f, "\n - comment: {}", comment)?;
        }
        Ok(())
    }
}

/// Commands and actions declared in a workspace's `wtsrc.yml`.
///
/// Serializes back into the same document shape it was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    commands: BTreeMap<String, CommandHooks>,
    actions: BTreeMap<String, Action>,
    #[serde(skip)]
    warnings: Vec<ConfigWarning>,
}

impl ProjectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds hooks for a command, warning when the command is unknown to an
    /// authoritative registry or when a hook can never run for it.
    pub fn add_command(
        &mut self,
        hooks: CommandHooks,
        registry: &CommandRegistry,
    ) -> Result<(), ProjectModelError> {
        if self.commands.contains_key(&hooks.name) {
            return Err(ProjectModelError::DuplicateCommand(hooks.name));
        }

        if registry.is_authoritative() && !registry.is_known_command(&hooks.name) {
            self.warn(ConfigWarning::UnknownCommand {
                name: hooks.name.clone(),
            });
        }

        for stage in [HookStage::Pre, HookStage::Post] {
            if hooks.action_for(stage).is_some() && !registry.hook_allowed_for(&hooks.name, stage)
            {
                self.warn(ConfigWarning::UnreachableHook {
                    name: hooks.name.clone(),
                    stage,
                });
            }
        }

        self.commands.insert(hooks.name.clone(), hooks);
        Ok(())
    }

    pub fn add_action(&mut self, action: Action) -> Result<(), ProjectModelError> {
        if self.actions.contains_key(&action.name) {
            return Err(ProjectModelError::DuplicateAction(action.name));
        }
        self.actions.insert(action.name.clone(), action);
        Ok(())
    }

    /// Records an advisory warning and logs it.
    pub fn warn(&mut self, warning: ConfigWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn command(&self, name: &str) -> Option<&CommandHooks> {
        self.commands.get(name)
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandHooks> {
        self.commands.values()
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.actions.is_empty()
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Commands:")?;
        for hooks in self.commands() {
            for line in hooks.to_string().lines() {
                writeln!(f, "  {}", line)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Actions:")?;
        for action in self.actions() {
            for line in action.to_string().lines() {
                writeln!(f, "  {}", line)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::hook_stage::HookSupport;
    use pretty_assertions::assert_eq;

    fn hooks(name: &str, pre: Option<&str>, post: Option<&str>) -> CommandHooks {
        CommandHooks::new(name, pre.map(String::from), post.map(String::from))
    }

    #[test]
    fn test_duplicate_command_is_rejected() {
        let registry = CommandRegistry::new();
        let mut config = ProjectConfig::new();
        config
            .add_command(hooks("sync", Some("echo one"), None), &registry)
            .unwrap();

        let error = config
            .add_command(hooks("sync", Some("echo two"), None), &registry)
            .unwrap_err();
        assert_eq!(error, ProjectModelError::DuplicateCommand("sync".to_string()));
        assert_eq!(
            config.command("sync").unwrap().pre_action.as_deref(),
            Some("echo one")
        );
    }

    #[test]
    fn test_duplicate_action_is_rejected() {
        let mut config = ProjectConfig::new();
        config.add_action(Action::new("build", "make all")).unwrap();
        let error = config
            .add_action(Action::new("build", "make clean all"))
            .unwrap_err();
        assert_eq!(error.to_string(), "'build' action is defined in wtsrc.yml more than once");
    }

    #[test]
    fn test_unknown_command_warns_only_with_authoritative_registry() {
        let mut config = ProjectConfig::new();
        config
            .add_command(hooks("frobnicate", Some("true"), None), &CommandRegistry::new())
            .unwrap();
        assert!(config.warnings().is_empty());

        let mut registry = CommandRegistry::new();
        registry.register_known_command("sync");
        let mut config = ProjectConfig::new();
        config
            .add_command(hooks("frobnicate", Some("true"), None), &registry)
            .unwrap();
        config.add_command(hooks("sync", None, None), &registry).unwrap();
        assert_eq!(
            config.warnings(),
            &[ConfigWarning::UnknownCommand {
                name: "frobnicate".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_authoritative_registry_warns_for_every_command() {
        let registry = CommandRegistry::authoritative();
        let mut config = ProjectConfig::new();
        config.add_command(hooks("sync", None, None), &registry).unwrap();
        assert_eq!(config.warnings().len(), 1);
    }

    #[test]
    fn test_unreachable_hooks_warn() {
        let mut registry = CommandRegistry::new();
        registry.register_command("init", HookSupport::PostOnly);
        registry.register_command("add-alias", HookSupport::None);

        let mut config = ProjectConfig::new();
        config
            .add_command(hooks("init", Some("echo pre"), Some("echo post")), &registry)
            .unwrap();
        config
            .add_command(hooks("add-alias", None, Some("echo post")), &registry)
            .unwrap();

        assert_eq!(
            config.warnings(),
            &[
                ConfigWarning::UnreachableHook {
                    name: "init".to_string(),
                    stage: HookStage::Pre
                },
                ConfigWarning::UnreachableHook {
                    name: "add-alias".to_string(),
                    stage: HookStage::Post
                },
            ]
        );
        // The hook is still recorded; only execution is refused.
        assert_eq!(
            config.command("init").unwrap().pre_action.as_deref(),
            Some("echo pre")
        );
    }

    #[test]
    fn test_warning_messages() {
        assert_eq!(
            ConfigWarning::MissingSection { section: "actions" }.to_string(),
            "'actions' section not found in wtsrc.yml file"
        );
        assert_eq!(
            ConfigWarning::UnreachableHook {
                name: "init".to_string(),
                stage: HookStage::Pre
            }
            .to_string(),
            "wtsrc.yml defines a pre-action for command 'init' that cannot be executed by wtsrc"
        );
    }

    #[test]
    fn test_display_form() {
        let registry = CommandRegistry::new();
        let mut config = ProjectConfig::new();
        config
            .add_command(hooks("sync", None, Some("echo done")), &registry)
            .unwrap();
        config
            .add_action(Action::new("build", "make all").with_comment("everything"))
            .unwrap();

        let expected = "Commands:\n  name: sync\n   - pre:  None\n   - post: echo done\n\n\
                        Actions:\n  name: build\n   - action:  make all\n   - comment: everything\n\n";
        assert_eq!(config.to_string(), expected);
    }
}
