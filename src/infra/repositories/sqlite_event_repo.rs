use crate::domain::models::event::Event;
use crate::domain::ports::EventRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, name, date, time, location, banner_url, accent_color, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&event.id)
        .bind(&event.name)
        .bind(event.date)
        .bind(event.time)
        .bind(&event.location)
        .bind(&event.banner_url)
        .bind(&event.accent_color)
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT id, name, date, time, location, banner_url, accent_color, created_at FROM events WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT id, name, date, time, location, banner_url, accent_color, created_at FROM events ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET name = ?, date = ?, time = ?, location = ?, banner_url = ?, accent_color = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(&event.name)
        .bind(event.date)
        .bind(event.time)
        .bind(&event.location)
        .bind(&event.banner_url)
        .bind(&event.accent_color)
        .bind(&event.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or(AppError::NotFound("Event not found".into()))
    }
}
