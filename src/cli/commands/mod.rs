//! Command implementations, one module per subcommand.

pub mod add;
pub mod edit;
pub mod generate;
pub mod get;
pub mod list;
pub mod register;
pub mod remove;
