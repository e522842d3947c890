pub mod error;
pub mod logging;
pub mod result;
pub mod settings;
pub mod working_dir;
