//! Middleware and extractors for cross-cutting request concerns.
//!
//! - [`auth`]: the `AuthUser` extractor that validates the bearer token
//! - [`role`]: the viewer-role model and role-check helpers
//!
//! # Authentication Flow
//!
//! 1. Client sends a request with `Authorization: Bearer <token>`
//! 2. `AuthUser` validates the JWT and exposes the claims
//! 3. Handlers derive a [`role::Viewer`] from the claims and pass it
//!    explicitly into service functions, which narrow every query to the
//!    rows that viewer may see

pub mod auth;
pub mod role;
