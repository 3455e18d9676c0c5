//! # Mock Security Context Factory Module
//!
//! Maps a marker descriptor onto an authenticated security context.
//!
//! ## Features
//! - **Pure Data Mapping**: Copies present attributes into a claim map,
//!   appends caller-supplied claims, resolves authorities
//! - **Fail Fast**: Malformed timestamps, reserved role prefixes, and
//!   conflicting roles/authorities abort construction immediately
//! - **Single Shot**: Synchronous, no retries, no external I/O
//!
//! ## Requirements
//! - The produced token is never cryptographically issued or verified; its
//!   signature stays a fixed placeholder

use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::context::{JwtAuthenticationToken, SecurityContext};
use crate::error::AuthError;
use crate::jwt::Jwt;
use crate::token::{MockJwtToken, DEFAULT_ROLE, ROLE_PREFIX};

/// Builds authenticated security contexts from [`MockJwtToken`] descriptors.
pub struct ContextFactory;

impl ContextFactory {
    /// Header algorithm advertised by every mock token.
    const HEADER_ALG: &'static str = "RS256";
    /// Header type advertised by every mock token.
    const HEADER_TYP: &'static str = "JWT";

    /// Creates the security context described by the given marker.
    ///
    /// Seeds the claim map with the subject and, when non-empty, audience,
    /// expiration, issued-at, token identifier, and scope; appends the
    /// additional claim pairs (last write wins); resolves the authority set;
    /// and wraps everything into an authenticated [`SecurityContext`].
    ///
    /// # Arguments
    ///
    /// * `token` - The marker descriptor supplied by the test
    pub fn create_security_context(token: &MockJwtToken) -> Result<SecurityContext, AuthError> {
        if token.subject.trim().is_empty() {
            tracing::warn!("rejecting mock security context with empty subject");
            return Err(AuthError::EmptySubject);
        }

        let mut headers = Map::new();
        headers.insert("alg".to_string(), Value::String(Self::HEADER_ALG.to_string()));
        headers.insert("typ".to_string(), Value::String(Self::HEADER_TYP.to_string()));

        // Default jwt token attributes.
        let mut claims = Map::new();
        claims.insert("sub".to_string(), Value::String(token.subject.clone()));

        if !token.audience.is_empty() {
            claims.insert("aud".to_string(), Value::Array(Self::distinct(&token.audience)));
        }

        if let Some(expires_at) = &token.expires_at {
            let instant = Self::parse_instant("expires_at", expires_at)?;
            claims.insert("exp".to_string(), Self::instant_claim(instant));
        }

        if let Some(issued_at) = &token.issued_at {
            let instant = Self::parse_instant("issued_at", issued_at)?;
            claims.insert("iat".to_string(), Self::instant_claim(instant));
        }

        if let Some(jti) = &token.jti {
            claims.insert("jti".to_string(), Value::String(jti.clone()));
        }

        if !token.scope.is_empty() {
            claims.insert("scope".to_string(), Value::Array(Self::distinct(&token.scope)));
        }

        let authorities = Self::resolve_authorities(token)?;

        for (name, value) in &token.additional_claims {
            // Map insertion overwrites any same-named claim already present.
            claims.insert(name.clone(), Value::String(value.clone()));
        }

        let jwt = Jwt::new(token.token.clone(), headers, claims);

        tracing::debug!(
            "built mock security context for subject '{}' with {} authorities",
            token.subject,
            authorities.len()
        );

        Ok(SecurityContext::new(JwtAuthenticationToken::new(
            jwt,
            authorities,
        )))
    }

    /// Resolves the authority set for the given marker.
    ///
    /// Explicit authorities are used verbatim and require `roles` to stay at
    /// its single default value. Otherwise each role is prefixed with
    /// `ROLE_`, rejecting role values that already carry the prefix.
    fn resolve_authorities(token: &MockJwtToken) -> Result<Vec<String>, AuthError> {
        let mut authorities = token.authorities.clone();

        if authorities.is_empty() {
            for role in &token.roles {
                if role.starts_with(ROLE_PREFIX) {
                    tracing::warn!("role '{}' already carries the reserved prefix", role);
                    return Err(AuthError::RolePrefix(role.clone()));
                }
                authorities.push(format!("{ROLE_PREFIX}{role}"));
            }
        } else if !(token.roles.len() == 1 && token.roles[0] == DEFAULT_ROLE) {
            tracing::warn!(
                "marker customizes both roles ({:?}) and authorities ({:?})",
                token.roles,
                token.authorities
            );
            return Err(AuthError::ConflictingRolesAndAuthorities {
                roles: token.roles.clone(),
                authorities: token.authorities.clone(),
            });
        }

        Ok(authorities)
    }

    /// Parses an ISO-8601 instant attribute.
    ///
    /// # Arguments
    ///
    /// * `field` - The descriptor attribute name, for error reporting
    /// * `raw` - The attribute value
    fn parse_instant(field: &'static str, raw: &str) -> Result<DateTime<Utc>, AuthError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(|source| {
                tracing::warn!("failed to parse {} value '{}': {}", field, raw, source);
                AuthError::MalformedTimestamp { field, source }
            })
    }

    /// Stores an instant claim as a normalized RFC 3339 string.
    fn instant_claim(instant: DateTime<Utc>) -> Value {
        Value::String(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    /// Collapses a value list into its distinct values, preserving first-seen
    /// order.
    fn distinct(values: &[String]) -> Vec<Value> {
        let mut seen = HashSet::new();
        values
            .iter()
            .filter(|value| seen.insert(value.as_str()))
            .map(|value| Value::String(value.clone()))
            .collect()
    }
}
