pub mod command_lifecycle;
pub mod run_action;

pub use command_lifecycle::{CommandLifecycle, LifecycleReport, LifecycleState};
pub use run_action::RunActionUseCase;
