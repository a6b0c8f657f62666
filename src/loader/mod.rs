//! Sources an extension tree can be loaded from.

pub mod git;
pub mod interface;
pub mod local;

pub use git::GitLoader;
pub use interface::ExtensionLoader;
pub use local::LocalLoader;
