// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication boundary.
//!
//! The hosted auth provider is an external collaborator: the core only needs
//! an opaque identity for owner stamping at write time. `AuthProvider` is the
//! seam; the real provider lives outside this crate.

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Opaque user identity, as handed out by the hosted auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity(String);

impl UserIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Session capability consumed by the gateway.
///
/// Write operations use `current_user` as the owner; the identity is never
/// taken from client input.
pub trait AuthProvider: Send + Sync {
    /// The identity of the signed-in user, if any.
    fn current_user(&self) -> Option<UserIdentity>;

    /// End the session with the hosted provider.
    fn sign_out(&self) -> BoxFuture<'_, Result<(), DataError>>;
}

/// Fixed-identity session for local runs and tests.
#[derive(Debug, Clone)]
pub struct StaticAuth {
    identity: UserIdentity,
}

impl StaticAuth {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: UserIdentity::new(identity),
        }
    }
}

impl AuthProvider for StaticAuth {
    fn current_user(&self) -> Option<UserIdentity> {
        Some(self.identity.clone())
    }

    fn sign_out(&self) -> BoxFuture<'_, Result<(), DataError>> {
        Box::pin(async { Ok(()) })
    }
}

/// No session: read-only access.
#[derive(Debug, Clone, Default)]
pub struct GuestAuth;

impl AuthProvider for GuestAuth {
    fn current_user(&self) -> Option<UserIdentity> {
        None
    }

    fn sign_out(&self) -> BoxFuture<'_, Result<(), DataError>> {
        Box::pin(async { Ok(()) })
    }
}
