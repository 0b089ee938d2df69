// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod admin;
pub mod logging;
pub mod store;
pub mod types;
pub mod validation;

pub use admin::*;
pub use logging::*;
pub use store::*;
pub use types::*;
pub use validation::*;
