//! Fixed names and user-overridable settings.

use std::path::PathBuf;

/// Project file holding hooks and actions, kept in the manifest repository.
pub const PROJECT_FILE: &str = "wtsrc.yml";

/// Directory marking the root of a tsrc workspace.
pub const TSRC_DIRECTORY: &str = ".tsrc";

/// Subdirectory of [`TSRC_DIRECTORY`] where tsrc clones the manifest.
pub const MANIFEST_DIRECTORY: &str = "manifest";

/// tsrc manifest inside [`MANIFEST_DIRECTORY`].
pub const MANIFEST_FILE: &str = "manifest.yml";

/// tsrc workspace configuration inside [`TSRC_DIRECTORY`].
pub const TSRC_CONFIG_FILE: &str = "config.yml";

/// Alias registry file name, stored in the home directory by default.
pub const ALIAS_FILE: &str = ".wtsrcdata.yml";

/// Program invoked for workspace-wide operations.
pub const DEFAULT_TSRC_PROGRAM: &str = "tsrc";

/// Settings resolved from the command line and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Location of the alias registry file
    pub alias_file: PathBuf,
    /// Program used for `tsrc` invocations
    pub tsrc_program: String,
    /// Print `WTSRC OK` and debug logging
    pub verbose: bool,
}

impl Settings {
    pub fn new(alias_file: Option<PathBuf>, tsrc_program: Option<String>, verbose: bool) -> Self {
        Self {
            alias_file: alias_file.unwrap_or_else(default_alias_file),
            tsrc_program: tsrc_program.unwrap_or_else(|| DEFAULT_TSRC_PROGRAM.to_string()),
            verbose,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(None, None, false)
    }
}

/// `$HOME/.wtsrcdata.yml`, or the current directory when no home is known.
pub fn default_alias_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(ALIAS_FILE)
}
