use crate::api::{ApiError, AppState};
use crate::domain::{default_columns, Board, BoardId};
use crate::error::CorkboardError;
use crate::storage::{list_board_details, load_board_detail};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/boards", get(list_boards).post(create_board))
        .route("/api/boards/:id", get(get_board))
}

/// GET /api/boards - all boards with nested, ordered columns and cards
async fn list_boards(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let boards = list_board_details(state.storage.as_ref())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "Error fetching boards");
            ApiError::Internal("Failed to fetch boards".to_string())
        })?;
    Ok(Json(boards))
}

/// POST /api/boards - create a board with the three seeded columns
async fn create_board(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    // Accept freeform JSON so a missing or non-string title maps to 400
    // rather than a deserialization rejection.
    let title = body
        .get("title")
        .and_then(Value::as_str)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Title is required".to_string()))?;

    let board = Board::new(title.to_string());
    let result = async {
        state.storage.save_board(&board).await?;
        for column in default_columns(&board.id) {
            state.storage.save_column(&column).await?;
        }
        load_board_detail(state.storage.as_ref(), &board.id).await
    }
    .await;

    let detail = result.map_err(|err| {
        tracing::error!(error = %err, "Error creating board");
        ApiError::Internal("Failed to create board".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/boards/:id - full board details
async fn get_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let board_id = BoardId::from(id);
    let detail = load_board_detail(state.storage.as_ref(), &board_id)
        .await
        .map_err(|err| match err {
            CorkboardError::BoardNotFound(_) => {
                ApiError::NotFound("Board not found".to_string())
            }
            err => {
                tracing::error!(error = %err, "Error fetching board");
                ApiError::Internal("Failed to fetch board".to_string())
            }
        })?;
    Ok(Json(detail))
}
