//! Ownership-scoped repository trait.
//!
//! Every repository over a user-owned table implements this trait, and every
//! method takes the owner email as its first argument. There is no unscoped
//! variant of any operation: a caller that has no owner in hand cannot express
//! a query against owned data at all.
//!
//! Reads and mutations fold the owner into the SQL predicate itself
//! (`WHERE id = $1 AND user_email = $2`), so "not found" and "owned by someone
//! else" are the same outcome: `None` or `false`. Callers map both to 404.

use crate::db::errors::Result;

/// Repository over a table whose rows belong to exactly one user.
#[async_trait::async_trait]
pub trait OwnedRepository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity belonging to `owner`
    async fn create(&mut self, owner: &str, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID, if it exists and belongs to `owner`
    async fn get_by_id(&mut self, owner: &str, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List all of `owner`'s entities
    async fn list(&mut self, owner: &str, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Update an entity by ID. Returns None when the row does not exist or
    /// belongs to another user.
    async fn update(&mut self, owner: &str, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>>;

    /// Delete an entity by ID. Returns false when the row does not exist or
    /// belongs to another user.
    async fn delete(&mut self, owner: &str, id: Self::Id) -> Result<bool>;
}
