pub mod alias_name;
pub mod hook_stage;
