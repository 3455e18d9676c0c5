//! # Security Context and Ambient Slot Module
//!
//! The authenticated principal produced for one test, plus the thread-scoped
//! slot that code under test may query for the ambient identity.
//!
//! ## Features
//! - **Explicit Value First**: Contexts are ordinary values that can be
//!   threaded through the code under test
//! - **Scoped Installation**: [`SecurityContext::install`] returns an RAII
//!   guard with guaranteed teardown, safe to nest
//! - **Thread Isolation**: Each thread owns its own slot; parallel tests
//!   never observe each other's identity
//!
//! ## Slot Strategy
//! 1. Installing stores the context and remembers the previous slot value
//! 2. Dropping the guard restores the previous value
//! 3. A thread that never installed anything reads `None`

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::jwt::Jwt;

thread_local! {
    /// The current thread's ambient security context slot.
    static CURRENT_CONTEXT: RefCell<Option<SecurityContext>> = const { RefCell::new(None) };
}

/// An authentication object carrying a mock [`Jwt`], the granted authority
/// list, and the subject as principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtAuthenticationToken {
    /// The mock token.
    jwt: Jwt,
    /// Granted authorities, in resolution order.
    authorities: Vec<String>,
    /// The principal name, taken from the token subject.
    principal: String,
}

impl JwtAuthenticationToken {
    pub(crate) fn new(jwt: Jwt, authorities: Vec<String>) -> Self {
        let principal = jwt.subject().to_string();
        Self {
            jwt,
            authorities,
            principal,
        }
    }

    /// Returns the carried mock token.
    pub fn jwt(&self) -> &Jwt {
        &self.jwt
    }

    /// Returns the assembled claim map of the carried token.
    pub fn token_attributes(&self) -> &Map<String, Value> {
        self.jwt.claims()
    }

    /// Returns the granted authorities, in resolution order.
    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    /// Checks whether a specific authority was granted.
    ///
    /// # Arguments
    ///
    /// * `authority` - The authority string to look for
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|granted| granted == authority)
    }

    /// Returns the principal name.
    pub fn principal(&self) -> &str {
        &self.principal
    }
}

/// The record of "who is currently authenticated" for one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityContext {
    /// The installed authentication.
    authentication: JwtAuthenticationToken,
}

impl SecurityContext {
    pub(crate) fn new(authentication: JwtAuthenticationToken) -> Self {
        Self { authentication }
    }

    /// Returns the authentication carried by this context.
    pub fn authentication(&self) -> &JwtAuthenticationToken {
        &self.authentication
    }

    /// Installs this context into the current thread's ambient slot.
    ///
    /// The returned guard restores the previous slot value when dropped, so
    /// installations nest and always tear down, even on panic.
    #[must_use = "dropping the guard immediately uninstalls the context"]
    pub fn install(self) -> ContextGuard {
        let previous = CURRENT_CONTEXT.with(|slot| slot.borrow_mut().replace(self));
        tracing::debug!("installed mock security context into thread-local slot");
        ContextGuard { previous }
    }

    /// Returns a clone of the current thread's ambient context, when one is
    /// installed.
    pub fn current() -> Option<SecurityContext> {
        CURRENT_CONTEXT.with(|slot| slot.borrow().clone())
    }
}

/// RAII guard for a scoped context installation.
///
/// Restores the previously installed context (or clears the slot) on drop.
#[derive(Debug)]
pub struct ContextGuard {
    previous: Option<SecurityContext>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_CONTEXT.with(|slot| *slot.borrow_mut() = previous);
        tracing::debug!("restored previous security context slot state");
    }
}
