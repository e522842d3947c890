pub mod action_resolver;
pub mod project_config_service;
pub mod project_context;

pub use action_resolver::ActionResolver;
pub use project_config_service::{ProjectConfigError, ProjectConfigService};
pub use project_context::{LazyProject, ProjectContext, ProjectLoader};
