//! Database repository for job applications.

use crate::{
    db::{
        errors::Result,
        handlers::owned::OwnedRepository,
        models::applications::{
            ApplicationCreateDBRequest, ApplicationDBResponse, ApplicationUpdateDBRequest, StatusCountDBResponse,
        },
    },
    types::ApplicationId,
};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing applications
#[derive(Debug, Clone)]
pub struct ApplicationFilter {
    /// Restrict to a single status (e.g. "applied", "interview")
    pub status: Option<String>,
    /// Number of rows to skip
    pub skip: i64,
    /// Maximum number of rows to return
    pub limit: i64,
}

impl Default for ApplicationFilter {
    fn default() -> Self {
        Self {
            status: None,
            skip: 0,
            limit: 100,
        }
    }
}

pub struct Applications<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Applications<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Per-status counts of `owner`'s applications, most common first.
    #[instrument(skip(self), err)]
    pub async fn status_summary(&mut self, owner: &str) -> Result<Vec<StatusCountDBResponse>> {
        let counts = sqlx::query_as::<_, StatusCountDBResponse>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM job_applications
            WHERE user_email = $1
            GROUP BY status
            ORDER BY count DESC, status ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(counts)
    }
}

#[async_trait::async_trait]
impl<'c> OwnedRepository for Applications<'c> {
    type CreateRequest = ApplicationCreateDBRequest;
    type UpdateRequest = ApplicationUpdateDBRequest;
    type Response = ApplicationDBResponse;
    type Id = ApplicationId;
    type Filter = ApplicationFilter;

    #[instrument(skip(self, request), fields(company = %request.company), err)]
    async fn create(&mut self, owner: &str, request: &Self::CreateRequest) -> Result<Self::Response> {
        let application = sqlx::query_as::<_, ApplicationDBResponse>(
            r#"
            INSERT INTO job_applications
                (user_email, company, position, status, date, priority, matched_skills, required_skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(&request.company)
        .bind(&request.position)
        .bind(&request.status)
        .bind(request.date)
        .bind(&request.priority)
        .bind(&request.matched_skills)
        .bind(&request.required_skills)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(application)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, owner: &str, id: Self::Id) -> Result<Option<Self::Response>> {
        let application = sqlx::query_as::<_, ApplicationDBResponse>(
            "SELECT * FROM job_applications WHERE id = $1 AND user_email = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(application)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, owner: &str, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let applications = sqlx::query_as::<_, ApplicationDBResponse>(
            r#"
            SELECT * FROM job_applications
            WHERE user_email = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY date DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(owner)
        .bind(&filter.status)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(applications)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, owner: &str, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>> {
        let application = sqlx::query_as::<_, ApplicationDBResponse>(
            r#"
            UPDATE job_applications SET
                company = COALESCE($3, company),
                position = COALESCE($4, position),
                status = COALESCE($5, status),
                date = COALESCE($6, date),
                priority = COALESCE($7, priority),
                matched_skills = COALESCE($8, matched_skills),
                required_skills = COALESCE($9, required_skills)
            WHERE id = $1 AND user_email = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&request.company)
        .bind(&request.position)
        .bind(&request.status)
        .bind(request.date)
        .bind(&request.priority)
        .bind(&request.matched_skills)
        .bind(&request.required_skills)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(application)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, owner: &str, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1 AND user_email = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_user, sample_application};
    use sqlx::PgPool;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_records_owner(pool: PgPool) {
        create_test_user(&pool, "alice@example.com").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut apps = Applications::new(&mut conn);

        let created = apps
            .create("alice@example.com", &sample_application("Acme", "applied"))
            .await
            .unwrap();

        assert_eq!(created.user_email, "alice@example.com");
        assert_eq!(created.company, "Acme");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_ownership_isolation(pool: PgPool) {
        create_test_user(&pool, "alice@example.com").await;
        create_test_user(&pool, "bob@example.com").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut apps = Applications::new(&mut conn);

        let alice_app = apps
            .create("alice@example.com", &sample_application("Acme", "applied"))
            .await
            .unwrap();

        // Bob cannot see, update, or delete Alice's row, and the outcome is
        // identical to the row not existing
        let fetched = apps.get_by_id("bob@example.com", alice_app.id).await.unwrap();
        assert!(fetched.is_none());

        let updated = apps
            .update(
                "bob@example.com",
                alice_app.id,
                &ApplicationUpdateDBRequest {
                    status: Some("offer".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_none());

        let deleted = apps.delete("bob@example.com", alice_app.id).await.unwrap();
        assert!(!deleted);

        // Alice still sees her unmodified row
        let still_there = apps.get_by_id("alice@example.com", alice_app.id).await.unwrap().unwrap();
        assert_eq!(still_there.status, "applied");

        let bobs_list = apps.list("bob@example.com", &ApplicationFilter::default()).await.unwrap();
        assert!(bobs_list.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_orders_by_date_desc(pool: PgPool) {
        create_test_user(&pool, "alice@example.com").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut apps = Applications::new(&mut conn);

        let mut older = sample_application("Acme", "applied");
        older.date = chrono::NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let mut newer = sample_application("Globex", "interview");
        newer.date = chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        apps.create("alice@example.com", &older).await.unwrap();
        apps.create("alice@example.com", &newer).await.unwrap();

        let listed = apps.list("alice@example.com", &ApplicationFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].company, "Globex");
        assert_eq!(listed[1].company, "Acme");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_status_filter(pool: PgPool) {
        create_test_user(&pool, "alice@example.com").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut apps = Applications::new(&mut conn);

        apps.create("alice@example.com", &sample_application("Acme", "applied")).await.unwrap();
        apps.create("alice@example.com", &sample_application("Globex", "interview"))
            .await
            .unwrap();

        let filter = ApplicationFilter {
            status: Some("interview".to_string()),
            ..Default::default()
        };
        let listed = apps.list("alice@example.com", &filter).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].company, "Globex");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_pagination(pool: PgPool) {
        create_test_user(&pool, "alice@example.com").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut apps = Applications::new(&mut conn);

        for (day, company) in [(1, "Acme"), (2, "Globex"), (3, "Initech")] {
            let mut app = sample_application(company, "applied");
            app.date = chrono::NaiveDate::from_ymd_opt(2026, 2, day).unwrap();
            apps.create("alice@example.com", &app).await.unwrap();
        }

        let filter = ApplicationFilter {
            skip: 1,
            limit: 1,
            ..Default::default()
        };
        let page = apps.list("alice@example.com", &filter).await.unwrap();
        assert_eq!(page.len(), 1);
        // Second row of the date-descending order
        assert_eq!(page[0].company, "Globex");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_partial_update_keeps_other_fields(pool: PgPool) {
        create_test_user(&pool, "alice@example.com").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut apps = Applications::new(&mut conn);

        let created = apps
            .create("alice@example.com", &sample_application("Acme", "applied"))
            .await
            .unwrap();

        let updated = apps
            .update(
                "alice@example.com",
                created.id,
                &ApplicationUpdateDBRequest {
                    status: Some("offer".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, "offer");
        assert_eq!(updated.company, created.company);
        assert_eq!(updated.priority, created.priority);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_status_summary_counts(pool: PgPool) {
        create_test_user(&pool, "alice@example.com").await;
        create_test_user(&pool, "bob@example.com").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut apps = Applications::new(&mut conn);

        apps.create("alice@example.com", &sample_application("Acme", "applied")).await.unwrap();
        apps.create("alice@example.com", &sample_application("Globex", "applied"))
            .await
            .unwrap();
        apps.create("alice@example.com", &sample_application("Initech", "interview"))
            .await
            .unwrap();
        // Another user's rows never show up in the summary
        apps.create("bob@example.com", &sample_application("Hooli", "applied")).await.unwrap();

        let summary = apps.status_summary("alice@example.com").await.unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].status, "applied");
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[1].status, "interview");
        assert_eq!(summary[1].count, 1);
    }
}
