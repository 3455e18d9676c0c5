//! # Mock JWT Data Carrier Module
//!
//! The token-like object produced by the context factory.
//!
//! ## Features
//! - **Pure Information Carrier**: Header and claim maps plus typed accessors,
//!   no validation logic
//! - **Last Write Wins**: Duplicate claim names simply overwrite
//! - **Unsigned Rendering**: [`Jwt::to_compact`] produces a format-correct
//!   compact token with a placeholder signature
//!
//! ## Requirements
//! - The carried token value and the rendered compact form are never
//!   cryptographically issued or verified

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder signature attached to rendered compact tokens.
///
/// Format-correct base64url, cryptographically meaningless.
pub const MOCK_SIGNATURE: &str = "MOCK_SIGNATURE_FOR_TESTING_ONLY_NOT_VALID";

/// A mock JSON Web Token: raw token value, header map, and claim map.
///
/// Claims are plain `serde_json` values keyed by claim name. Instant-valued
/// claims (`exp`, `iat`) are stored as RFC 3339 strings and parsed back by
/// the typed accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jwt {
    /// The raw token value the descriptor supplied.
    token_value: String,
    /// Header fields (`alg`, `typ`).
    headers: Map<String, Value>,
    /// The assembled claim set.
    claims: Map<String, Value>,
}

impl Jwt {
    pub(crate) fn new(
        token_value: String,
        headers: Map<String, Value>,
        claims: Map<String, Value>,
    ) -> Self {
        Self {
            token_value,
            headers,
            claims,
        }
    }

    /// Returns the raw token value.
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Returns the header map.
    pub fn headers(&self) -> &Map<String, Value> {
        &self.headers
    }

    /// Returns the full claim map.
    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    /// Looks up a single claim by name.
    ///
    /// # Arguments
    ///
    /// * `name` - The claim name
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Returns the `sub` claim.
    pub fn subject(&self) -> &str {
        self.claims
            .get("sub")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Returns the `jti` claim, when present.
    pub fn jti(&self) -> Option<&str> {
        self.claims.get("jti").and_then(Value::as_str)
    }

    /// Returns the distinct audience values from the `aud` claim.
    pub fn audience(&self) -> Vec<&str> {
        self.string_set("aud")
    }

    /// Returns the distinct scope values from the `scope` claim.
    pub fn scope(&self) -> Vec<&str> {
        self.string_set("scope")
    }

    /// Returns the `exp` claim parsed back into an instant, when present.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.instant("exp")
    }

    /// Returns the `iat` claim parsed back into an instant, when present.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.instant("iat")
    }

    /// Renders the header and claim maps as a compact, **unsigned** JWT.
    ///
    /// The two encoded segments are real base64url JSON; the third segment is
    /// the fixed [`MOCK_SIGNATURE`] placeholder. The result parses as a JWT
    /// but can never pass signature verification.
    pub fn to_compact(&self) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD
            .encode(Value::Object(self.headers.clone()).to_string());
        let payload = general_purpose::URL_SAFE_NO_PAD
            .encode(Value::Object(self.claims.clone()).to_string());
        format!("{header}.{payload}.{MOCK_SIGNATURE}")
    }

    fn string_set(&self, name: &str) -> Vec<&str> {
        self.claims
            .get(name)
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn instant(&self, name: &str) -> Option<DateTime<Utc>> {
        self.claims
            .get(name)
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|instant| instant.with_timezone(&Utc))
    }
}
