pub mod alias_registry;
pub mod command_registry;
pub mod manifest;
pub mod project_config;
pub mod tsrc_config;
pub mod workspace;
