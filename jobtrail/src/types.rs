//! Common type definitions shared across layers.
//!
//! Entity IDs are aliased for readability: user rows use UUIDs, while the
//! user-owned resources (applications, contacts, timeline entries) use the
//! database's BIGSERIAL sequence and are exposed as `i64`.
//!
//! Note that the user row UUID is an implementation detail of the users table.
//! The canonical identity carried in tokens and ownership predicates is the
//! registered email address, not the row id.

use uuid::Uuid;

pub type UserId = Uuid;
pub type ApplicationId = i64;
pub type ContactId = i64;
pub type TimelineEntryId = i64;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbrev_uuid() {
        let id: Uuid = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }
}
