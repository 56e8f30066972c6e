//! Database entity models (requests and responses for the repository layer).

pub mod applications;
pub mod contacts;
pub mod timelines;
pub mod users;
