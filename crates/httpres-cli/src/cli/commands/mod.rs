//! CLI command handlers. Each command is in its own file.

mod alike;
mod config;
mod fetch;
mod inspect;
mod reference_arg;

pub use alike::run_alike;
pub use config::run_config;
pub use fetch::run_fetch;
pub use inspect::run_inspect;
