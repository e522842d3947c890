use crate::domain::entities::command_registry::CommandRegistry;
use crate::domain::entities::project_config::ProjectConfig;
use crate::domain::value_objects::hook_stage::HookStage;

/// Read-only lookups over a loaded project configuration.
pub struct ActionResolver<'a> {
    config: &'a ProjectConfig,
    registry: &'a CommandRegistry,
}

impl<'a> ActionResolver<'a> {
    pub fn new(config: &'a ProjectConfig, registry: &'a CommandRegistry) -> Self {
        Self { config, registry }
    }

    pub fn get_command_pre_action(&self, name: &str) -> Option<&'a str> {
        self.configured_hook(name, HookStage::Pre)
    }

    pub fn get_command_post_action(&self, name: &str) -> Option<&'a str> {
        self.configured_hook(name, HookStage::Post)
    }

    pub fn get_action(&self, action_name: &str) -> Option<&'a str> {
        self.config
            .action(action_name)
            .map(|action| action.action.as_str())
    }

    /// The pre-action the lifecycle may actually run for `name`.
    pub fn runnable_pre_action(&self, name: &str) -> Option<&'a str> {
        self.runnable_hook(name, HookStage::Pre)
    }

    /// The post-action the lifecycle may actually run for `name`.
    pub fn runnable_post_action(&self, name: &str) -> Option<&'a str> {
        self.runnable_hook(name, HookStage::Post)
    }

    pub fn runnable_hook(&self, name: &str, stage: HookStage) -> Option<&'a str> {
        if !self.registry.hook_allowed_for(name, stage) {
            return None;
        }
        self.configured_hook(name, stage)
    }

    fn configured_hook(&self, name: &str, stage: HookStage) -> Option<&'a str> {
        self.config.command(name)?.action_for(stage)
    }
}
