//! HTTP handlers for stock movement endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::{require, CurrentUser};
use crate::models::StockMovement;
use crate::services::movement::{MovementService, RecordMovementInput};
use crate::AppState;
use shared::{Action, Resource};

/// List all stock movements
pub async fn list_movements(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<StockMovement>>> {
    require(&current_user.0, Action::Read, Resource::StockMovement)?;
    let service = MovementService::new(state.db);
    let movements = service.list().await?;
    Ok(Json(movements))
}

/// Record a stock movement
pub async fn record_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<Json<StockMovement>> {
    require(&current_user.0, Action::Create, Resource::StockMovement)?;
    let service = MovementService::new(state.db);
    let movement = service.record(current_user.0.user_id, input).await?;
    Ok(Json(movement))
}
