//! Command implementations for kit-cli

pub mod add;
pub mod list;
pub mod report;
pub mod upgrade;
pub mod version;

pub use add::run_add;
pub use list::run_list;
pub use upgrade::run_upgrade;
pub use version::run_version;
