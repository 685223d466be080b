pub mod constants;
pub mod loader;
pub mod settings;
