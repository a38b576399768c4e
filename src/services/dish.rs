use sqlx::PgPool;

use crate::{
    error::AppError,
    models::dish::{CreateDishRequest, Dish, DishStatus, UpdateDishRequest},
};

const DISH_COLUMNS: &str =
    "id, name, price, description, image, status, created_at, updated_at";

pub struct DishService;

impl DishService {
    /// Newest dishes first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Dish>, AppError> {
        let dishes = sqlx::query_as::<_, Dish>(&format!(
            "SELECT {DISH_COLUMNS} FROM dishes ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await?;
        Ok(dishes)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Dish, AppError> {
        sqlx::query_as::<_, Dish>(&format!("SELECT {DISH_COLUMNS} FROM dishes WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound("dish not found".into()))
    }

    pub async fn create(pool: &PgPool, req: &CreateDishRequest) -> Result<Dish, AppError> {
        let status = req.status.unwrap_or(DishStatus::Available);
        let dish = sqlx::query_as::<_, Dish>(&format!(
            "INSERT INTO dishes (name, price, description, image, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {DISH_COLUMNS}"
        ))
        .bind(&req.name)
        .bind(req.price)
        .bind(&req.description)
        .bind(&req.image)
        .bind(status.to_string())
        .fetch_one(pool)
        .await?;
        Ok(dish)
    }

    /// Partial update: absent fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        req: &UpdateDishRequest,
    ) -> Result<Dish, AppError> {
        if req.is_empty() {
            return Err(AppError::entity("body", "No fields to update"));
        }
        sqlx::query_as::<_, Dish>(&format!(
            "UPDATE dishes SET
                 name = COALESCE($2, name),
                 price = COALESCE($3, price),
                 description = COALESCE($4, description),
                 image = COALESCE($5, image),
                 status = COALESCE($6, status),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {DISH_COLUMNS}"
        ))
        .bind(id)
        .bind(&req.name)
        .bind(req.price)
        .bind(&req.description)
        .bind(&req.image)
        .bind(req.status.map(|s| s.to_string()))
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("dish not found".into()))
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<Dish, AppError> {
        sqlx::query_as::<_, Dish>(&format!(
            "DELETE FROM dishes WHERE id = $1 RETURNING {DISH_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("dish not found".into()))
    }
}
