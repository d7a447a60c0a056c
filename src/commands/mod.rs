//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against the catalog or the configuration.

pub mod clean;
pub mod completions;
pub mod config;
pub mod edit;
pub mod list;
pub mod roots;
pub mod show;

// Re-export execute functions for convenience
pub use self::clean::execute as clean;
pub use self::completions::execute as completions;
pub use self::config::execute as config;
pub use self::edit::execute as edit;
pub use self::list::execute as list;
pub use self::roots::execute as roots;
pub use self::show::execute as show;
