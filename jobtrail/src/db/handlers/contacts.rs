//! Database repository for networking contacts.

use crate::{
    db::{
        errors::Result,
        handlers::owned::OwnedRepository,
        models::contacts::{ContactCreateDBRequest, ContactDBResponse, ContactUpdateDBRequest},
    },
    types::ContactId,
};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing contacts
#[derive(Debug, Clone)]
pub struct ContactFilter {
    /// Restrict to contacts at a single company
    pub company: Option<String>,
    /// Number of rows to skip
    pub skip: i64,
    /// Maximum number of rows to return
    pub limit: i64,
}

impl Default for ContactFilter {
    fn default() -> Self {
        Self {
            company: None,
            skip: 0,
            limit: 100,
        }
    }
}

pub struct Contacts<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Contacts<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> OwnedRepository for Contacts<'c> {
    type CreateRequest = ContactCreateDBRequest;
    type UpdateRequest = ContactUpdateDBRequest;
    type Response = ContactDBResponse;
    type Id = ContactId;
    type Filter = ContactFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, owner: &str, request: &Self::CreateRequest) -> Result<Self::Response> {
        let contact = sqlx::query_as::<_, ContactDBResponse>(
            r#"
            INSERT INTO network_contacts (user_email, name, role, company, linkedin, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(&request.name)
        .bind(&request.role)
        .bind(&request.company)
        .bind(&request.linkedin)
        .bind(&request.email)
        .bind(&request.phone)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(contact)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, owner: &str, id: Self::Id) -> Result<Option<Self::Response>> {
        let contact = sqlx::query_as::<_, ContactDBResponse>(
            "SELECT * FROM network_contacts WHERE id = $1 AND user_email = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(contact)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, owner: &str, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let contacts = sqlx::query_as::<_, ContactDBResponse>(
            r#"
            SELECT * FROM network_contacts
            WHERE user_email = $1 AND ($2::text IS NULL OR company = $2)
            ORDER BY name ASC, id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(owner)
        .bind(&filter.company)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(contacts)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, owner: &str, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>> {
        let contact = sqlx::query_as::<_, ContactDBResponse>(
            r#"
            UPDATE network_contacts SET
                name = COALESCE($3, name),
                role = COALESCE($4, role),
                company = COALESCE($5, company),
                linkedin = COALESCE($6, linkedin),
                email = COALESCE($7, email),
                phone = COALESCE($8, phone)
            WHERE id = $1 AND user_email = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&request.name)
        .bind(&request.role)
        .bind(&request.company)
        .bind(&request.linkedin)
        .bind(&request.email)
        .bind(&request.phone)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(contact)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, owner: &str, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM network_contacts WHERE id = $1 AND user_email = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
