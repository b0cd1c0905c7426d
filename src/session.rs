//! Explicit authenticated-session context
//!
//! The session is a value passed into every client constructor rather than
//! ambient global state: whoever builds the clients owns the handle, and
//! tests run against a plain in-memory instance.

use std::sync::{Arc, RwLock};

use crate::identity::Cpf;

/// An authenticated user session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Bearer token attached to every outbound request
    pub token: String,
    pub account_number: String,
    pub name: String,
    pub cpf: Cpf,
}

/// Cloneable handle to the (possibly absent) current session.
///
/// All clones share one slot. Clearing the handle signs the user out
/// everywhere at once, which is how an expired token is handled.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    /// A fresh, signed-out handle.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, session: Session) {
        *self.write() = Some(session);
    }

    pub fn clear(&self) {
        *self.write() = None;
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
