use std::collections::BTreeSet;

use crate::domain::value_objects::hook_stage::{HookStage, HookSupport};

/// Which command names the binary implements and which of them can never
/// run a pre- or post-action.
///
/// Built once at startup from the CLI's command table and handed to the
/// loader and the lifecycle controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRegistry {
    /// `None` until the first command is registered. Only a registered set is
    /// authoritative enough to warn about unknown commands.
    known_commands: Option<BTreeSet<String>>,
    pre_action_not_possible: BTreeSet<String>,
    post_action_not_possible: BTreeSet<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose known-command set is authoritative even while empty.
    pub fn authoritative() -> Self {
        Self {
            known_commands: Some(BTreeSet::new()),
            ..Self::default()
        }
    }

    /// Registers `name` as known and records the hooks it supports.
    pub fn register_command(&mut self, name: &str, support: HookSupport) {
        self.register_known_command(name);
        if !support.allows(HookStage::Pre) {
            self.register_pre_action_not_possible(name);
        }
        if !support.allows(HookStage::Post) {
            self.register_post_action_not_possible(name);
        }
    }

    pub fn register_known_command(&mut self, name: &str) {
        self.known_commands
            .get_or_insert_with(BTreeSet::new)
            .insert(name.to_string());
    }

    pub fn register_pre_action_not_possible(&mut self, name: &str) {
        self.pre_action_not_possible.insert(name.to_string());
    }

    pub fn register_post_action_not_possible(&mut self, name: &str) {
        self.post_action_not_possible.insert(name.to_string());
    }

    pub fn is_authoritative(&self) -> bool {
        self.known_commands.is_some()
    }

    /// `true` when the set is authoritative and contains `name`, or when no
    /// commands have been registered yet.
    pub fn is_known_command(&self, name: &str) -> bool {
        match &self.known_commands {
            Some(known) => known.contains(name),
            None => true,
        }
    }

    pub fn known_commands(&self) -> impl Iterator<Item = &str> {
        self.known_commands.iter().flatten().map(String::as_str)
    }

    pub fn pre_action_allowed_for(&self, name: &str) -> bool {
        !self.pre_action_not_possible.contains(name)
    }

    pub fn post_action_allowed_for(&self, name: &str) -> bool {
        !self.post_action_not_possible.contains(name)
    }

    pub fn hook_allowed_for(&self, name: &str, stage: HookStage) -> bool {
        match stage {
            HookStage::Pre => self.pre_action_allowed_for(name),
            HookStage::Post => self.post_action_allowed_for(name),
        }
    }
}
