//! Configuration loading for the CLI.

pub mod settings;

pub use settings::Settings;
