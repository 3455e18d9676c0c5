//! # mock-jwt
//!
//! A lightweight, framework-agnostic Rust library for installing mock JWT security contexts in tests.
//!
//! ## Features
//! - **Framework Agnostic**: Not dependent on any web or test framework, can be used in any Rust project.
//! - **Declarative Markers**: An explicit descriptor with named optional attributes and documented defaults.
//! - **Scoped Installation**: Thread-local context slot with an RAII guard and guaranteed teardown.
//! - **Never Signed**: Tokens carry a fixed placeholder signature; nothing is issued or verified.
//!
//! ## Quick Start
//!
//! ```rust
//! use mock_jwt::{MockJwtToken, SecurityContext};
//!
//! # fn main() -> Result<(), mock_jwt::AuthError> {
//! // 1. Describe the principal the test should run as
//! let marker = MockJwtToken::new("user-1")
//!     .roles(["ADMIN"])
//!     .scope(["report:read"])
//!     .additional_claim("tenant", "acme");
//!
//! // 2. Install the mock security context for the scope of the test
//! let _guard = marker.install()?;
//!
//! // 3. Code under test queries the ambient identity
//! let context = SecurityContext::current().expect("context installed");
//! assert!(context.authentication().has_authority("ROLE_ADMIN"));
//! assert_eq!(context.authentication().principal(), "user-1");
//! # Ok(())
//! # }
//! ```
// Module declarations for the library's internal components.
/// Security context, authentication object, and the ambient slot.
mod context;
/// Defines error types for the library.
mod error;
/// Maps marker descriptors onto security contexts.
mod factory;
/// The mock JWT data carrier.
mod jwt;
/// The marker descriptor and its builder.
mod token;


// Re-exporting key types and functions for a clean public API.
pub use context::{ContextGuard, JwtAuthenticationToken, SecurityContext};
pub use error::AuthError;
pub use factory::ContextFactory;
pub use jwt::{Jwt, MOCK_SIGNATURE};
pub use token::{MockJwtToken, SetupTiming, DEFAULT_TOKEN, ROLE_PREFIX};
