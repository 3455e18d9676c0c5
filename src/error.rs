//! Defines the error types that can occur while building a mock security context.
//!
//! This module provides the full set of failures that may arise when a
//! marker descriptor is mapped onto an authenticated security context, and
//! is independent of any specific test framework.

use thiserror::Error;

/// Represents errors that can occur during mock security context construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    /// The subject attribute is empty or contains only whitespace.
    #[error("subject must not be empty")]
    EmptySubject,

    /// A timestamp attribute is not a valid ISO-8601 instant.
    #[error("malformed {field} timestamp: {source}")]
    MalformedTimestamp {
        /// The descriptor attribute that failed to parse.
        field: &'static str,
        /// The underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },

    /// A role value already carries the reserved `ROLE_` prefix.
    #[error("roles cannot start with ROLE_, got {0}")]
    RolePrefix(String),

    /// Roles and authorities were both customized on the same marker.
    #[error("cannot define roles {roles:?} together with authorities {authorities:?}")]
    ConflictingRolesAndAuthorities {
        /// The customized roles attribute.
        roles: Vec<String>,
        /// The customized authorities attribute.
        authorities: Vec<String>,
    },
}
