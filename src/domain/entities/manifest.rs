use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("The repo {dest} doesn't exist")]
    UnknownRepo { dest: String },
}

/// tsrc manifest (`manifest.yml`).
///
/// Only the fields wtsrc edits are typed; every other key is carried through
/// untouched so saving does not lose anything tsrc understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub repos: Vec<ManifestRepo>,

    #[serde(flatten)]
    pub other: Mapping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestRepo {
    /// Path of the repository relative to the workspace root
    pub dest: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(flatten)]
    pub other: Mapping,
}

impl ManifestRepo {
    pub fn new(dest: impl Into<String>) -> Self {
        Self {
            dest: dest.into(),
            branch: None,
            other: Mapping::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.other.insert(Value::from(key), value.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

impl Manifest {
    pub fn repo(&self, dest: &str) -> Option<&ManifestRepo> {
        self.repos.iter().find(|repo| repo.dest == dest)
    }

    pub fn has_repo(&self, dest: &str) -> bool {
        self.repo(dest).is_some()
    }

    /// Points the repository at `dest` to `branch`.
    pub fn update_branch(&mut self, dest: &str, branch: &str) -> Result<(), ManifestError> {
        let repo = self
            .repos
            .iter_mut()
            .find(|repo| repo.dest == dest)
            .ok_or_else(|| ManifestError::UnknownRepo {
                dest: dest.to_string(),
            })?;
        repo.branch = Some(branch.to_string());
        Ok(())
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "~".to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repos:")?;
        for repo in &self.repos {
            writeln!(f, "  dest => {}", repo.dest)?;
            for (key, value) in &repo.other {
                writeln!(f, "  {} => {}", render_value(key), render_value(value))?;
            }
            if let Some(branch) = &repo.branch {
                writeln!(f, "  branch => {}", branch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
