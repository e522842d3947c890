use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a command a hook runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookStage {
    Pre,
    Post,
}

impl HookStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookStage::Pre => "pre",
            HookStage::Post => "post",
        }
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hooks a command supports, declared next to the CLI command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookSupport {
    /// Both pre- and post-actions may run
    #[default]
    Full,
    /// Only the post-action may run (e.g. commands that create the workspace)
    PostOnly,
    /// No hooks at all (e.g. alias commands that run outside any workspace)
    None,
}

impl HookSupport {
    pub fn allows(&self, stage: HookStage) -> bool {
        match (self, stage) {
            (HookSupport::Full, _) => true,
            (HookSupport::PostOnly, HookStage::Post) => true,
            (HookSupport::PostOnly, HookStage::Pre) => false,
            (HookSupport::None, _) => false,
        }
    }
}
