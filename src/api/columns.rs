use crate::api::{ApiError, AppState};
use crate::domain::{next_order, sort_ascending, BoardId, Column, ColumnDetail, ColumnId};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{patch, post};
use axum::{Json, Router};
use serde::Deserialize;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/columns", post(create_column))
        .route("/api/columns/:id", patch(update_column))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateColumnRequest {
    title: Option<String>,
    board_id: Option<BoardId>,
}

#[derive(Debug, Deserialize)]
struct UpdateColumnRequest {
    title: Option<String>,
    order: Option<i64>,
}

/// POST /api/columns - append a column to a board
async fn create_column(
    State(state): State<AppState>,
    Json(req): Json<CreateColumnRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (title, board_id) = match (req.title, req.board_id) {
        (Some(title), Some(board_id)) if !title.is_empty() && !board_id.as_str().is_empty() => {
            (title, board_id)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Title and boardId are required".to_string(),
            ))
        }
    };

    let detail = async {
        let siblings = state.storage.list_columns(&board_id).await?;
        let column = Column::new(title, next_order(&siblings), board_id);
        state.storage.save_column(&column).await?;
        Ok::<_, crate::error::CorkboardError>(ColumnDetail {
            column,
            cards: Vec::new(),
        })
    }
    .await
    .map_err(|err| {
        tracing::error!(error = %err, "Error creating column");
        ApiError::Internal("Failed to create column".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(detail)))
}

/// PATCH /api/columns/:id - update title and/or order
async fn update_column(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateColumnRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.is_none() && req.order.is_none() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let column_id = ColumnId::from(id);
    let detail = async {
        let mut column = state.storage.load_column(&column_id).await?;
        if let Some(title) = req.title {
            column.set_title(title);
        }
        if let Some(order) = req.order {
            column.set_order(order);
        }
        state.storage.save_column(&column).await?;

        let mut cards = state.storage.list_cards(&column.id).await?;
        sort_ascending(&mut cards);
        Ok::<_, crate::error::CorkboardError>(ColumnDetail { column, cards })
    }
    .await
    .map_err(|err| {
        // A missing column surfaces as 500 here, matching the original
        // API, which had no dedicated not-found path for columns.
        tracing::error!(error = %err, "Error updating column");
        ApiError::Internal("Failed to update column".to_string())
    })?;

    Ok(Json(detail))
}
