pub mod admin;
pub mod local_user;
pub mod preferences;

pub use admin::*;
pub use local_user::*;
pub use preferences::*;
