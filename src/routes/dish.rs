use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppError,
    models::{
        account::AccountRole,
        auth::AuthenticatedUser,
        dish::{CreateDishRequest, Dish, UpdateDishRequest},
    },
    services::dish::DishService,
    AppState,
};

/// Dish mutations are reserved to the owner.
fn require_owner(user: &AuthenticatedUser) -> Result<(), AppError> {
    if user.role != AccountRole::Owner {
        return Err(AppError::Forbidden("Owner role required".into()));
    }
    Ok(())
}

/// GET /dishes — public: customers browse the menu without logging in.
pub async fn list_dishes(State(state): State<AppState>) -> Result<Json<Vec<Dish>>, AppError> {
    let dishes = DishService::list(&state.db).await?;
    Ok(Json(dishes))
}

/// GET /dishes/{id} — public.
pub async fn get_dish(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Dish>, AppError> {
    let dish = DishService::get(&state.db, id).await?;
    Ok(Json(dish))
}

pub async fn create_dish(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateDishRequest>,
) -> Result<Json<Dish>, AppError> {
    require_owner(&user)?;
    let dish = DishService::create(&state.db, &body).await?;
    Ok(Json(dish))
}

pub async fn update_dish(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(body): Json<UpdateDishRequest>,
) -> Result<Json<Dish>, AppError> {
    require_owner(&user)?;
    let dish = DishService::update(&state.db, id, &body).await?;
    Ok(Json(dish))
}

pub async fn delete_dish(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<Dish>, AppError> {
    require_owner(&user)?;
    let dish = DishService::delete(&state.db, id).await?;
    Ok(Json(dish))
}
