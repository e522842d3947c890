pub mod alias_store;
pub mod project_store;
pub mod workspace_store;

pub use alias_store::{AliasDefinition, AliasStore, AliasStoreError};
pub use project_store::{ProjectStore, WorkspaceProjectLoader};
pub use workspace_store::{WorkspaceStore, WorkspaceStoreError};
