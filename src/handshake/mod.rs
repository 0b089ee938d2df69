//! Single-use `state` / `nonce` tokens protecting the redirect login flow.

pub mod generator;
pub mod token_manager;

pub use generator::{TokenGenerator, UuidTokenGenerator};
pub use token_manager::{HandshakeTokenManager, TokenKind, TokenStatus};
