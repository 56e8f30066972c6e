//! Authentication system.
//!
//! # Authentication Flow
//!
//! Browser and API clients authenticate the same way:
//! - Users register via `/authentication/register` and log in via
//!   `/authentication/login` with email/password
//! - A signed JWT is returned in the response body and set as a secure,
//!   HTTP-only session cookie
//! - Subsequent requests present the token via the session cookie or an
//!   `Authorization: Bearer <token>` header
//! - Logout clears the cookie; tokens are not tracked server-side and remain
//!   valid until expiry
//!
//! # Modules
//!
//! - [`identity`]: Extractor for getting the authenticated user in handlers
//! - [`password`]: Password hashing and verification using Argon2
//! - [`session`]: JWT session token creation and verification

pub mod identity;
pub mod password;
pub mod session;
