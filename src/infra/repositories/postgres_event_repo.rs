use crate::domain::models::event::Event;
use crate::domain::ports::EventRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, name, date, time, location, banner_url, accent_color, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
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
            "SELECT id, name, date, time, location, banner_url, accent_color, created_at FROM events WHERE id = $1",
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
            "UPDATE events SET name = $1, date = $2, time = $3, location = $4, banner_url = $5, accent_color = $6 \
             WHERE id = $7 RETURNING *",
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
