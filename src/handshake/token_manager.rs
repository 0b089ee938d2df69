use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::generator::{TokenGenerator, UuidTokenGenerator};
use crate::store::{keys, KeyValueStore, StoreError};

/// The two independent single-use tokens of the redirect login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Sent as the OAuth `state` parameter and checked on the callback.
    State,
    /// Embedded in the identity token; the caller compares it itself.
    Nonce,
}

impl TokenKind {
    pub fn key(&self) -> &'static str {
        match self {
            TokenKind::State => keys::STATE,
            TokenKind::Nonce => keys::NONCE,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Absent,
    Pending,
}

/// Mints and consumes the `state` and `nonce` handshake tokens.
///
/// Each kind is a two-state machine (`Absent` / `Pending`). `generate` always
/// leaves the kind `Pending` with a fresh value, replacing any older one.
/// Consumption always leaves it `Absent`, whatever the outcome, so a value can
/// be checked at most once.
pub struct HandshakeTokenManager {
    store: Arc<dyn KeyValueStore>,
    generator: Arc<dyn TokenGenerator>,
}

impl HandshakeTokenManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_generator(store, Arc::new(UuidTokenGenerator))
    }

    pub fn with_generator(
        store: Arc<dyn KeyValueStore>,
        generator: Arc<dyn TokenGenerator>,
    ) -> Self {
        if !store.is_enabled() {
            warn!("Handshake tokens use a disabled store; every verification will fail.");
        }
        HandshakeTokenManager { store, generator }
    }

    /// Peek at a kind without consuming it.
    pub fn status(&self, kind: TokenKind) -> TokenStatus {
        if self.store.contains(kind.key()) {
            TokenStatus::Pending
        } else {
            TokenStatus::Absent
        }
    }

    /// Mint a new pending token of `kind` and return its value.
    pub fn generate(&self, kind: TokenKind) -> Result<String, StoreError> {
        let value = self.generator.generate();
        let replaced = self.status(kind) == TokenStatus::Pending;
        self.store.set(kind.key(), &value)?;
        info!(
            event_name = "handshake.generate",
            event_domain = "handshake",
            kind = kind.key(),
            replaced,
            "handshake token issued"
        );
        Ok(value)
    }

    /// Remove and return the pending token of `kind`, if any.
    pub fn consume(&self, kind: TokenKind) -> Result<Option<String>, StoreError> {
        let value = self.store.take(kind.key())?;
        debug!(
            event_name = "handshake.consume",
            event_domain = "handshake",
            kind = kind.key(),
            was_pending = value.is_some(),
            "handshake token consumed"
        );
        Ok(value)
    }

    pub fn generate_state(&self) -> Result<String, StoreError> {
        self.generate(TokenKind::State)
    }

    /// Checks `candidate` against the pending state and consumes it either way.
    ///
    /// Returns `false` when nothing was pending. A failed substrate delete is
    /// reported as an error, since the token could then be replayed.
    pub fn verify_state(&self, candidate: &str) -> Result<bool, StoreError> {
        let stored = self.consume(TokenKind::State)?;
        let matches = stored
            .as_deref()
            .is_some_and(|stored| constant_time_eq(stored.as_bytes(), candidate.as_bytes()));
        if !matches {
            warn!(
                event_name = "handshake.state.mismatch",
                event_domain = "handshake",
                was_pending = stored.is_some(),
                "state verification failed"
            );
        }
        Ok(matches)
    }

    pub fn generate_nonce(&self) -> Result<String, StoreError> {
        self.generate(TokenKind::Nonce)
    }

    /// Returns the pending nonce, if any, and consumes it. The caller compares
    /// it against the value carried by the signed identity token.
    pub fn take_nonce(&self) -> Result<Option<String>, StoreError> {
        self.consume(TokenKind::Nonce)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
