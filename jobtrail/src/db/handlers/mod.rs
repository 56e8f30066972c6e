//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection or transaction, provides
//! strongly-typed CRUD operations, and returns models from
//! [`crate::db::models`].
//!
//! # Available Repositories
//!
//! - [`Users`]: credential records, looked up during login and registration
//! - [`Applications`]: job applications, owner-scoped
//! - [`Contacts`]: networking contacts, owner-scoped
//! - [`Timelines`]: per-application status timelines, scoped through the
//!   parent application
//!
//! The owned repositories implement [`OwnedRepository`], whose methods all
//! take the owner email as their first argument. See [`owned`] for why.
//!
//! # Common Pattern
//!
//! ```ignore
//! use jobtrail::db::handlers::{Applications, OwnedRepository};
//!
//! async fn example(pool: &sqlx::PgPool, owner: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Applications::new(&mut conn);
//!     let apps = repo.list(owner, &Default::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod applications;
pub mod contacts;
pub mod owned;
pub mod timelines;
pub mod users;

pub use applications::Applications;
pub use contacts::Contacts;
pub use owned::OwnedRepository;
pub use timelines::Timelines;
pub use users::Users;
