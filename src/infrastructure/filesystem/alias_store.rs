use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::Validate;

use crate::domain::entities::alias_registry::AliasRegistry;
use crate::domain::value_objects::alias_name::AliasName;

/// Alias file related errors
#[derive(Debug, Error)]
pub enum AliasStoreError {
    #[error("Alias file read failed for {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Alias file {path} is invalid: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Alias file write failed for {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Alias validation failed: {0}")]
    ValidationFailed(String),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// An alias as typed on the command line, before it enters the registry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AliasDefinition {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1))]
    pub url: String,
}

impl AliasDefinition {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Checks field constraints and returns the validated alias name.
    pub fn validated_name(&self) -> Result<AliasName, AliasStoreError> {
        self.validate()
            .map_err(|e| AliasStoreError::ValidationFailed(e.to_string()))?;
        if self.url.trim().is_empty() {
            return Err(AliasStoreError::ValidationFailed(
                "url: must not be blank".to_string(),
            ));
        }
        AliasName::new(&self.name).map_err(|e| AliasStoreError::ValidationFailed(e.to_string()))
    }
}

/// Reads and writes the alias registry file.
#[derive(Debug, Clone)]
pub struct AliasStore {
    path: PathBuf,
}

impl AliasStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the registry; a missing or empty file is an empty registry.
    /// Loading never creates the file.
    pub fn load(&self) -> Result<AliasRegistry, AliasStoreError> {
        if !self.path.exists() {
            tracing::debug!("no alias file at {}", self.path.display());
            return Ok(AliasRegistry::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| AliasStoreError::ReadFailed {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(AliasRegistry::new());
        }

        serde_yaml::from_str(&content).map_err(|source| AliasStoreError::ParseFailed {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, registry: &AliasRegistry) -> Result<(), AliasStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| AliasStoreError::WriteFailed {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let yaml_content = serde_yaml::to_string(registry)?;
        fs::write(&self.path, yaml_content).map_err(|source| AliasStoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("saved {} aliases to {}", registry.len(), self.path.display());
        Ok(())
    }
}
