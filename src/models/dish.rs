use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DishStatus {
    Available,
    Unavailable,
    Hidden,
}

impl std::fmt::Display for DishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DishStatus::Available => "available",
            DishStatus::Unavailable => "unavailable",
            DishStatus::Hidden => "hidden",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for DishStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(DishStatus::Available),
            "unavailable" => Ok(DishStatus::Unavailable),
            "hidden" => Ok(DishStatus::Hidden),
            _ => Err(anyhow::anyhow!("Unknown dish status: {s}")),
        }
    }
}

/// DB row struct — status stored as TEXT, same convention as Account.role.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dish {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub description: String,
    pub image: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDishRequest {
    pub name: String,
    pub price: i32,
    pub description: String,
    pub image: String,
    pub status: Option<DishStatus>,
}

/// Partial update: only the provided fields change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDishRequest {
    pub name: Option<String>,
    pub price: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub status: Option<DishStatus>,
}

impl UpdateDishRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [DishStatus::Available, DishStatus::Unavailable, DishStatus::Hidden] {
            assert_eq!(status.to_string().parse::<DishStatus>().unwrap(), status);
        }
        assert!("sold_out".parse::<DishStatus>().is_err());
    }

    #[test]
    fn update_request_reports_emptiness() {
        assert!(UpdateDishRequest::default().is_empty());
        let update = UpdateDishRequest {
            price: Some(45000),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn update_request_ignores_absent_fields() {
        let update: UpdateDishRequest =
            serde_json::from_str(r#"{ "name": "Phở bò", "status": "hidden" }"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("Phở bò"));
        assert_eq!(update.status, Some(DishStatus::Hidden));
        assert!(update.price.is_none());
    }
}
