pub mod runner;
pub mod settings;
