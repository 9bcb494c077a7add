use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub banner_url: Option<String>,
    pub accent_color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        name: String,
        date: NaiveDate,
        time: NaiveTime,
        location: String,
        banner_url: Option<String>,
        accent_color: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            date,
            time,
            location,
            banner_url,
            accent_color,
            created_at: Utc::now(),
        }
    }

    /// Date in the long Portuguese form used by invites and emails,
    /// e.g. "12 de junho de 2026".
    pub fn formatted_date(&self) -> String {
        const MONTHS: [&str; 12] = [
            "janeiro",
            "fevereiro",
            "março",
            "abril",
            "maio",
            "junho",
            "julho",
            "agosto",
            "setembro",
            "outubro",
            "novembro",
            "dezembro",
        ];
        let month = MONTHS[self.date.month0() as usize];
        format!("{} de {} de {}", self.date.day(), month, self.date.year())
    }

    /// Time without seconds, "HH:MM".
    pub fn formatted_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_date_and_time() {
        let event = Event::new(
            "Wine & Cheese".to_string(),
            NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
            NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            "Aula Magna".to_string(),
            None,
            None,
        );

        assert_eq!(event.formatted_date(), "12 de junho de 2026");
        assert_eq!(event.formatted_time(), "18:30");
    }
}
