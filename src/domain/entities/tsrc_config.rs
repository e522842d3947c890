use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// tsrc's workspace settings (`.tsrc/config.yml`). Keys other than the
/// manifest branch are preserved as read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TsrcConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    manifest_branch: Option<String>,

    #[serde(flatten)]
    other: Mapping,
}

impl TsrcConfig {
    pub fn manifest_branch(&self) -> Option<&str> {
        self.manifest_branch.as_deref()
    }

    pub fn change_branch(&mut self, branch: impl Into<String>) {
        self.manifest_branch = Some(branch.into());
    }
}
