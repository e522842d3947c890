/// Infrastructure layer modules
///
/// Concrete implementations for the outside world:
/// - File system stores (project file, alias registry)
/// - Process execution (shell command runner)
pub mod filesystem;
pub mod process;

pub use filesystem::{AliasStore, ProjectStore};
pub use process::{CommandRunner, ShellCommandRunner};
