use crate::api::{ApiError, AppState};
use crate::domain::{next_order, Card, CardId, ColumnId, Comment, Priority};
use crate::error::CorkboardError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{patch, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/cards", post(create_card))
        .route("/api/cards/:id", patch(update_card))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCardRequest {
    content: Option<String>,
    column_id: Option<ColumnId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCardRequest {
    content: Option<String>,
    order: Option<i64>,
    column_id: Option<ColumnId>,
    due_date: Option<DateTime<Utc>>,
    assigned_to: Option<String>,
    priority: Option<Priority>,
    comments: Option<Vec<Comment>>,
}

impl UpdateCardRequest {
    fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.order.is_none()
            && self.column_id.is_none()
            && self.due_date.is_none()
            && self.assigned_to.is_none()
            && self.priority.is_none()
            && self.comments.is_none()
    }
}

/// POST /api/cards - append a card to a column
async fn create_card(
    State(state): State<AppState>,
    Json(req): Json<CreateCardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (content, column_id) = match (req.content, req.column_id) {
        (Some(content), Some(column_id)) if !content.is_empty() && !column_id.as_str().is_empty() => {
            (content, column_id)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Content and columnId are required".to_string(),
            ))
        }
    };

    let card = async {
        let siblings = state.storage.list_cards(&column_id).await?;
        let card = Card::new(content, next_order(&siblings), column_id);
        state.storage.save_card(&card).await?;
        Ok::<_, CorkboardError>(card)
    }
    .await
    .map_err(|err| {
        tracing::error!(error = %err, "Error creating card");
        ApiError::Internal("Failed to create card".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(card)))
}

/// PATCH /api/cards/:id - partial update, including cross-column moves.
///
/// A move reassigns `columnId` only; the card keeps its old ordinal and
/// is not re-ranked among its new siblings.
async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let card_id = CardId::from(id);
    let mut card = state
        .storage
        .load_card(&card_id)
        .await
        .map_err(|err| match err {
            CorkboardError::CardNotFound(_) => ApiError::NotFound("Card not found".to_string()),
            err => {
                tracing::error!(error = %err, "Error updating card");
                ApiError::Internal("Failed to update card".to_string())
            }
        })?;

    // A move to a different column needs the target verified first.
    if let Some(target) = &req.column_id {
        if *target != card.column_id {
            state
                .storage
                .load_column(target)
                .await
                .map_err(|err| match err {
                    CorkboardError::ColumnNotFound(_) => {
                        ApiError::BadRequest("Target column not found".to_string())
                    }
                    err => {
                        tracing::error!(error = %err, "Error updating card");
                        ApiError::Internal("Failed to update card".to_string())
                    }
                })?;
        }
    }

    if req.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    if let Some(content) = req.content {
        card.set_content(content);
    }
    if let Some(order) = req.order {
        card.set_order(order);
    }
    if let Some(column_id) = req.column_id {
        card.move_to_column(column_id);
    }
    if let Some(due_date) = req.due_date {
        card.set_due_date(due_date);
    }
    if let Some(assigned_to) = req.assigned_to {
        card.set_assigned_to(assigned_to);
    }
    if let Some(priority) = req.priority {
        card.set_priority(priority);
    }
    if let Some(comments) = req.comments {
        card.replace_comments(comments);
    }

    state.storage.save_card(&card).await.map_err(|err| {
        tracing::error!(error = %err, "Error updating card");
        ApiError::Internal("Failed to update card".to_string())
    })?;

    Ok(Json(card))
}

#[cfg(test)]
mod tests {
    use crate::api::test_util::{body_json, json_request, test_app};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Creates a board and returns (board id, "To Do" id, "In Progress" id)
    async fn create_board(app: &axum::Router) -> (String, String, String) {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/boards", json!({"title": "Sprint"})))
            .await
            .unwrap();
        let board: Value = body_json(response.into_body()).await;
        (
            board["id"].as_str().unwrap().to_string(),
            board["columns"][0]["id"].as_str().unwrap().to_string(),
            board["columns"][1]["id"].as_str().unwrap().to_string(),
        )
    }

    async fn create_card(app: &axum::Router, column_id: &str, content: &str) -> Value {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/cards",
                json!({"content": content, "columnId": column_id}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response.into_body()).await
    }

    async fn fetch_board(app: &axum::Router, board_id: &str) -> Value {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/boards/{}", board_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        body_json(response.into_body()).await
    }

    #[tokio::test]
    async fn test_create_card_appends_to_empty_column() {
        let app = test_app();
        let (_, todo, _) = create_board(&app).await;

        let card = create_card(&app, &todo, "first").await;
        assert_eq!(card["order"], 0);
        assert_eq!(card["columnId"], todo.as_str());
    }

    #[tokio::test]
    async fn test_create_card_appends_past_max_order() {
        let app = test_app();
        let (board_id, todo, _) = create_board(&app).await;

        create_card(&app, &todo, "a").await;
        create_card(&app, &todo, "b").await;
        let card = create_card(&app, &todo, "c").await;
        assert_eq!(card["order"], 2);

        // The new card lists last in its column on a fresh fetch.
        let board = fetch_board(&app, &board_id).await;
        let cards = board["columns"][0]["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2]["content"], "c");
    }

    #[tokio::test]
    async fn test_create_card_requires_fields() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/cards", json!({"content": "x"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = body_json(response.into_body()).await;
        assert_eq!(body["error"], "Content and columnId are required");
    }

    #[tokio::test]
    async fn test_create_card_on_missing_column_is_internal_error() {
        let app = test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/cards",
                json!({"content": "x", "columnId": "no-such-column"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_move_card_keeps_order() {
        let app = test_app();
        let (_, todo, doing) = create_board(&app).await;

        create_card(&app, &todo, "a").await;
        let card = create_card(&app, &todo, "b").await;
        let card_id = card["id"].as_str().unwrap().to_string();
        assert_eq!(card["order"], 1);

        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/api/cards/{}", card_id),
                json!({"columnId": &doing}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let moved: Value = body_json(response.into_body()).await;
        assert_eq!(moved["columnId"], doing.as_str());
        // The ordinal travels with the card; no re-ranking on move.
        assert_eq!(moved["order"], 1);
    }

    #[tokio::test]
    async fn test_move_to_missing_column_is_rejected() {
        let app = test_app();
        let (board_id, todo, _) = create_board(&app).await;

        let card = create_card(&app, &todo, "a").await;
        let card_id = card["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/cards/{}", card_id),
                json!({"columnId": "no-such-column"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = body_json(response.into_body()).await;
        assert_eq!(body["error"], "Target column not found");

        // The card stays in its column.
        let board = fetch_board(&app, &board_id).await;
        let cards = board["columns"][0]["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0]["columnId"], todo.as_str());
    }

    #[tokio::test]
    async fn test_update_card_requires_some_field() {
        let app = test_app();
        let (board_id, todo, _) = create_board(&app).await;

        let card = create_card(&app, &todo, "untouched").await;
        let card_id = card["id"].as_str().unwrap().to_string();
        let updated_at = card["updatedAt"].clone();

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/cards/{}", card_id),
                json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = body_json(response.into_body()).await;
        assert_eq!(body["error"], "No fields to update");

        // No store write happened.
        let board = fetch_board(&app, &board_id).await;
        let cards = board["columns"][0]["cards"].as_array().unwrap();
        assert_eq!(cards[0]["updatedAt"], updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_card_is_not_found() {
        let app = test_app();

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/api/cards/no-such-card",
                json!({"content": "x"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = body_json(response.into_body()).await;
        assert_eq!(body["error"], "Card not found");
    }

    #[tokio::test]
    async fn test_update_card_metadata_and_comments() {
        let app = test_app();
        let (_, todo, _) = create_board(&app).await;

        let card = create_card(&app, &todo, "task").await;
        let card_id = card["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/cards/{}", card_id),
                json!({
                    "dueDate": "2026-09-01T12:00:00Z",
                    "assignedTo": "ann",
                    "priority": "high",
                    "comments": [
                        {"id": "c1", "content": "looks good", "author": "bob",
                         "createdAt": "2026-08-01T09:00:00Z"}
                    ]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let updated: Value = body_json(response.into_body()).await;
        assert_eq!(updated["assignedTo"], "ann");
        assert_eq!(updated["priority"], "high");
        assert_eq!(updated["comments"].as_array().unwrap().len(), 1);

        // The comments array is replaced wholesale on the next update.
        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/api/cards/{}", card_id),
                json!({"comments": []}),
            ))
            .await
            .unwrap();
        let updated: Value = body_json(response.into_body()).await;
        assert!(updated["comments"].as_array().unwrap().is_empty());
        // Earlier metadata is untouched by a comments-only update.
        assert_eq!(updated["assignedTo"], "ann");
    }

    #[tokio::test]
    async fn test_same_column_patch_does_not_verify_target() {
        let app = test_app();
        let (_, todo, _) = create_board(&app).await;

        let card = create_card(&app, &todo, "task").await;
        let card_id = card["id"].as_str().unwrap().to_string();

        // Re-stating the current column is a valid (if pointless) update.
        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/api/cards/{}", card_id),
                json!({"columnId": todo}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
