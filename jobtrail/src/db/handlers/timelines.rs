//! Database repository for application timeline entries.
//!
//! Timeline rows have no owner column of their own - they are scoped through
//! their parent application. Every query here joins on `job_applications` and
//! matches the owner there, so an entry is reachable only by the user who owns
//! the application it belongs to.

use crate::{
    db::{
        errors::Result,
        models::timelines::{TimelineEntryCreateDBRequest, TimelineEntryDBResponse, TimelineEntryUpdateDBRequest},
    },
    types::{ApplicationId, TimelineEntryId},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Timelines<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Timelines<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Whether `owner` owns the given application. Callers use this to turn an
    /// empty timeline under a foreign application into a 404 rather than an
    /// empty list.
    #[instrument(skip(self), err)]
    pub async fn parent_owned(&mut self, owner: &str, application_id: ApplicationId) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM job_applications WHERE id = $1 AND user_email = $2)",
        )
        .bind(application_id)
        .bind(owner)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(exists)
    }

    /// Append an entry to an application's timeline. Returns None when the
    /// application does not exist or belongs to another user.
    #[instrument(skip(self, request), fields(status = %request.status), err)]
    pub async fn create(
        &mut self,
        owner: &str,
        application_id: ApplicationId,
        request: &TimelineEntryCreateDBRequest,
    ) -> Result<Option<TimelineEntryDBResponse>> {
        let entry = sqlx::query_as::<_, TimelineEntryDBResponse>(
            r#"
            INSERT INTO application_timeline (application_id, status, date, notes)
            SELECT $2, $3, COALESCE($4, NOW()), $5
            WHERE EXISTS (SELECT 1 FROM job_applications WHERE id = $2 AND user_email = $1)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(application_id)
        .bind(&request.status)
        .bind(request.date)
        .bind(&request.notes)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(entry)
    }

    /// All entries for an application, oldest first.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self, owner: &str, application_id: ApplicationId) -> Result<Vec<TimelineEntryDBResponse>> {
        let entries = sqlx::query_as::<_, TimelineEntryDBResponse>(
            r#"
            SELECT t.* FROM application_timeline t
            JOIN job_applications a ON a.id = t.application_id
            WHERE t.application_id = $1 AND a.user_email = $2
            ORDER BY t.date ASC, t.id ASC
            "#,
        )
        .bind(application_id)
        .bind(owner)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(entries)
    }

    /// The most recent entry for an application, if any.
    #[instrument(skip(self), err)]
    pub async fn latest(&mut self, owner: &str, application_id: ApplicationId) -> Result<Option<TimelineEntryDBResponse>> {
        let entry = sqlx::query_as::<_, TimelineEntryDBResponse>(
            r#"
            SELECT t.* FROM application_timeline t
            JOIN job_applications a ON a.id = t.application_id
            WHERE t.application_id = $1 AND a.user_email = $2
            ORDER BY t.date DESC, t.id DESC
            LIMIT 1
            "#,
        )
        .bind(application_id)
        .bind(owner)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(entry)
    }

    /// Update an entry. Returns None when the entry does not exist under an
    /// application owned by `owner`.
    #[instrument(skip(self, request), err)]
    pub async fn update(
        &mut self,
        owner: &str,
        application_id: ApplicationId,
        entry_id: TimelineEntryId,
        request: &TimelineEntryUpdateDBRequest,
    ) -> Result<Option<TimelineEntryDBResponse>> {
        let entry = sqlx::query_as::<_, TimelineEntryDBResponse>(
            r#"
            UPDATE application_timeline t SET
                status = COALESCE($4, t.status),
                date = COALESCE($5, t.date),
                notes = COALESCE($6, t.notes)
            FROM job_applications a
            WHERE t.id = $3 AND t.application_id = $2
              AND a.id = t.application_id AND a.user_email = $1
            RETURNING t.*
            "#,
        )
        .bind(owner)
        .bind(application_id)
        .bind(entry_id)
        .bind(&request.status)
        .bind(request.date)
        .bind(&request.notes)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(entry)
    }

    /// Delete an entry. Returns false when the entry does not exist under an
    /// application owned by `owner`.
    #[instrument(skip(self), err)]
    pub async fn delete(&mut self, owner: &str, application_id: ApplicationId, entry_id: TimelineEntryId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM application_timeline t
            USING job_applications a
            WHERE t.id = $3 AND t.application_id = $2
              AND a.id = t.application_id AND a.user_email = $1
            "#,
        )
        .bind(owner)
        .bind(application_id)
        .bind(entry_id)
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
