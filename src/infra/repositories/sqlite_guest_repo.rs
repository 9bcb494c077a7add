use crate::domain::models::guest::{CheckInOutcome, Guest, GuestStats};
use crate::domain::ports::GuestRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteGuestRepo {
    pool: SqlitePool,
}

impl SqliteGuestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, event_id, name, email, role_title, table_label, confirmed, rejected, checked_in, checked_in_at, email_sent, email_sent_at, created_at, updated_at";

#[async_trait]
impl GuestRepository for SqliteGuestRepo {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (id, event_id, name, email, role_title, table_label, confirmed, rejected, checked_in, checked_in_at, email_sent, email_sent_at, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&guest.id)
        .bind(&guest.event_id)
        .bind(&guest.name)
        .bind(&guest.email)
        .bind(&guest.role_title)
        .bind(&guest.table_label)
        .bind(guest.confirmed)
        .bind(guest.rejected)
        .bind(guest.checked_in)
        .bind(guest.checked_in_at)
        .bind(guest.email_sent)
        .bind(guest.email_sent_at)
        .bind(guest.created_at)
        .bind(guest.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn create_batch(&self, guests: &[Guest]) -> Result<Vec<Guest>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        for guest in guests {
            sqlx::query(
                "INSERT INTO guests (id, event_id, name, email, role_title, table_label, confirmed, rejected, checked_in, checked_in_at, email_sent, email_sent_at, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&guest.id)
            .bind(&guest.event_id)
            .bind(&guest.name)
            .bind(&guest.email)
            .bind(&guest.role_title)
            .bind(&guest.table_label)
            .bind(guest.confirmed)
            .bind(guest.rejected)
            .bind(guest.checked_in)
            .bind(guest.checked_in_at)
            .bind(guest.email_sent)
            .bind(guest.email_sent_at)
            .bind(guest.created_at)
            .bind(guest.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(guests.to_vec())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(&format!("SELECT {} FROM guests WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_in_event(&self, event_id: &str, id: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(&format!(
            "SELECT {} FROM guests WHERE event_id = ? AND id = ?",
            COLUMNS
        ))
        .bind(event_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn search_in_event(&self, event_id: &str, term: &str) -> Result<Option<Guest>, AppError> {
        let pattern = format!("%{}%", term);
        sqlx::query_as::<_, Guest>(&format!(
            "SELECT {} FROM guests WHERE event_id = ? AND (name LIKE ? OR email LIKE ?) LIMIT 1",
            COLUMNS
        ))
        .bind(event_id)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(&format!(
            "SELECT {} FROM guests WHERE event_id = ? ORDER BY name",
            COLUMNS
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update_details(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET name = ?, email = ?, role_title = ?, table_label = ?, updated_at = ? \
             WHERE id = ? AND event_id = ? RETURNING *",
        )
        .bind(&guest.name)
        .bind(&guest.email)
        .bind(&guest.role_title)
        .bind(&guest.table_label)
        .bind(Utc::now())
        .bind(&guest.id)
        .bind(&guest.event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or(AppError::NotFound("Guest not found".into()))
    }

    async fn set_rsvp(&self, id: &str, confirmed: bool, rejected: bool) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET confirmed = ?, rejected = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(confirmed)
        .bind(rejected)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or(AppError::NotFound("Guest not found".into()))
    }

    async fn set_table(&self, id: &str, table_label: Option<&str>) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET table_label = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(table_label)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or(AppError::NotFound("Guest not found".into()))
    }

    async fn set_checked_in(&self, id: &str, checked_in: bool) -> Result<Guest, AppError> {
        let checked_in_at = if checked_in { Some(Utc::now()) } else { None };
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET checked_in = ?, checked_in_at = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(checked_in)
        .bind(checked_in_at)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or(AppError::NotFound("Guest not found".into()))
    }

    async fn check_in(&self, event_id: &str, id: &str) -> Result<CheckInOutcome, AppError> {
        // Conditional update: only one concurrent scanner can win the
        // pending->checked-in transition, and checked_in_at is written once.
        let now = Utc::now();
        let updated = sqlx::query_as::<_, Guest>(
            "UPDATE guests SET checked_in = TRUE, checked_in_at = ?, updated_at = ? \
             WHERE id = ? AND event_id = ? AND checked_in = FALSE RETURNING *",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if let Some(guest) = updated {
            return Ok(CheckInOutcome::CheckedIn(guest));
        }

        match self.find_in_event(event_id, id).await? {
            Some(guest) => Ok(CheckInOutcome::AlreadyCheckedIn(guest)),
            None => Ok(CheckInOutcome::NotFound),
        }
    }

    async fn mark_email_sent(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE guests SET email_sent = TRUE, email_sent_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM guests WHERE id = ? AND event_id = ?")
            .bind(id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Guest not found".into()));
        }
        Ok(())
    }

    async fn stats(&self, event_id: &str) -> Result<GuestStats, AppError> {
        sqlx::query_as::<_, GuestStats>(
            "SELECT COUNT(*) AS total, \
                    COALESCE(SUM(CASE WHEN confirmed THEN 1 ELSE 0 END), 0) AS confirmed, \
                    COALESCE(SUM(CASE WHEN rejected THEN 1 ELSE 0 END), 0) AS rejected, \
                    COALESCE(SUM(CASE WHEN NOT confirmed AND NOT rejected THEN 1 ELSE 0 END), 0) AS pending, \
                    COALESCE(SUM(CASE WHEN checked_in THEN 1 ELSE 0 END), 0) AS present \
             FROM guests WHERE event_id = ?",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn recent_checkins(&self, event_id: &str, limit: i64) -> Result<Vec<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(&format!(
            "SELECT {} FROM guests WHERE event_id = ? AND checked_in = TRUE ORDER BY checked_in_at DESC LIMIT ?",
            COLUMNS
        ))
        .bind(event_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
