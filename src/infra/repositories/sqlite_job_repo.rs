use crate::domain::models::job::EmailJob;
use crate::domain::ports::JobRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteJobRepo {
    pool: SqlitePool,
}

impl SqliteJobRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for SqliteJobRepo {
    async fn create_batch(&self, jobs: &[EmailJob]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        for job in jobs {
            sqlx::query(
                "INSERT INTO email_jobs (id, event_id, guest_id, status, error_message, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&job.id)
            .bind(&job.event_id)
            .bind(&job.guest_id)
            .bind(&job.status)
            .bind(&job.error_message)
            .bind(job.created_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn claim_pending(&self, limit: i32) -> Result<Vec<EmailJob>, AppError> {
        // Claim-by-update so a second worker cannot pick up the same batch.
        sqlx::query_as::<_, EmailJob>(
            "UPDATE email_jobs SET status = 'PROCESSING' \
             WHERE id IN (SELECT id FROM email_jobs WHERE status = 'PENDING' ORDER BY created_at LIMIT ?) \
             RETURNING *",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_status(
        &self,
        id: &str,
        status: &str,
        error_message: Option<String>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE email_jobs SET status = ?, error_message = ? WHERE id = ?")
            .bind(status)
            .bind(error_message)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EmailJob>, AppError> {
        sqlx::query_as::<_, EmailJob>(
            "SELECT id, event_id, guest_id, status, error_message, created_at \
             FROM email_jobs WHERE event_id = ? ORDER BY created_at DESC LIMIT 100",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
