pub mod command_runner;

pub use command_runner::{
    CommandRunner,
    CommandRunnerError,
    ExecutionConfig,
    ExecutionMode,
    ExecutionResult,
    ShellCommandRunner,
};
