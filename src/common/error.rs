use std::path::PathBuf;
use thiserror::Error;

use crate::application::services::project_config_service::ProjectConfigError;
use crate::domain::entities::alias_registry::AliasError;
use crate::domain::entities::manifest::ManifestError;
use crate::domain::value_objects::hook_stage::HookStage;
use crate::infrastructure::filesystem::alias_store::AliasStoreError;
use crate::infrastructure::filesystem::workspace_store::WorkspaceStoreError;
use crate::infrastructure::process::command_runner::CommandRunnerError;

#[derive(Error, Debug)]
pub enum WtsrcError {
    #[error(transparent)]
    ProjectConfig(#[from] ProjectConfigError),

    #[error(transparent)]
    Alias(#[from] AliasError),

    #[error(transparent)]
    AliasStore(#[from] AliasStoreError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    WorkspaceStore(#[from] WorkspaceStoreError),

    #[error(transparent)]
    Runner(#[from] CommandRunnerError),

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Workspace error: {message}")]
    WorkspaceError {
        message: String,
        workspace_path: Option<PathBuf>,
    },

    #[error("'{name}' is not a wtsrc command")]
    UnknownCommand { name: String },

    #[error("The action '{name}' is not defined in wtsrc.yml")]
    UnknownAction { name: String },

    #[error("{stage}-action for '{command}' failed with exit code {exit_code}: {action}")]
    HookFailed {
        stage: HookStage,
        command: String,
        action: String,
        exit_code: i32,
    },

    #[error("Command failed with exit code {exit_code}: {command}")]
    CommandFailed { command: String, exit_code: i32 },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl WtsrcError {
    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn workspace_error(message: impl Into<String>, workspace_path: Option<PathBuf>) -> Self {
        Self::WorkspaceError {
            message: message.into(),
            workspace_path,
        }
    }

    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    pub fn unknown_action(name: impl Into<String>) -> Self {
        Self::UnknownAction { name: name.into() }
    }

    pub fn hook_failed(
        stage: HookStage,
        command: impl Into<String>,
        action: impl Into<String>,
        exit_code: i32,
    ) -> Self {
        Self::HookFailed {
            stage,
            command: command.into(),
            action: action.into(),
            exit_code,
        }
    }

    pub fn command_failed(command: impl Into<String>, exit_code: i32) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Exit code the process reports for this error.
    ///
    /// Failed hooks and commands surface their own exit code; every other
    /// fatal error uses 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::HookFailed { exit_code, .. } | Self::CommandFailed { exit_code, .. } => {
                if (1..=255).contains(exit_code) {
                    *exit_code
                } else {
                    1
                }
            }
            _ => 1,
        }
    }
}

impl From<std::io::Error> for WtsrcError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_yaml::Error> for WtsrcError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML serialization failed", error)
    }
}

impl From<serde_json::Error> for WtsrcError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization_error_with_source("JSON serialization failed", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_failed_message() {
        let error = WtsrcError::hook_failed(HookStage::Pre, "sync", "make check", 2);
        assert_eq!(
            error.to_string(),
            "pre-action for 'sync' failed with exit code 2: make check"
        );
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_falls_back_to_one() {
        assert_eq!(WtsrcError::command_failed("tsrc sync", -1).exit_code(), 1);
        assert_eq!(WtsrcError::command_failed("tsrc sync", 300).exit_code(), 1);
        assert_eq!(WtsrcError::unknown_command("frobnicate").exit_code(), 1);
        assert_eq!(
            WtsrcError::workspace_error("not in a workspace", None).exit_code(),
            1
        );
    }

    #[test]
    fn test_error_conversion_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: WtsrcError = io_error.into();
        assert!(matches!(error, WtsrcError::FileSystemError { .. }));
    }
}
