//! Typed player preferences over the key-value substrate.

pub mod codec;
pub mod preference_store;
pub mod validator;

pub use preference_store::*;
pub use validator::{DefaultValidator, PreferenceValidator};
