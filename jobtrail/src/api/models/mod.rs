//! Request/response data structures for the REST API.
//!
//! API models are distinct from the database models in [`crate::db::models`]:
//! they carry only what clients may see (no password hashes, no owner columns)
//! and convert to and from the db layer via `From` impls.

pub mod applications;
pub mod auth;
pub mod contacts;
pub mod pagination;
pub mod timelines;
pub mod users;
