use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    envelope::{Empty, Envelope},
    error::AppError,
    messages::{
        dto::{DeleteRequest, PostRequest, PostResponse, ReadRequest, ReadResponse},
        services::MessageService,
    },
    state::AppState,
};

pub fn board_routes() -> Router<AppState> {
    Router::new()
        .route("/post", post(post_message))
        .route("/delete", post(delete_message))
        .route("/read", post(read_messages))
}

#[instrument(skip(board, payload))]
pub async fn post_message(
    State(board): State<MessageService>,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<Envelope<PostResponse>>, AppError> {
    let Json(payload) = payload?;
    let message_id = board
        .post(&payload.email, &payload.password, &payload.title, &payload.message)
        .await?;
    Ok(Envelope::ok(PostResponse {
        message_id,
        title: payload.title,
    }))
}

#[instrument(skip(board, payload))]
pub async fn delete_message(
    State(board): State<MessageService>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<Envelope<Empty>>, AppError> {
    let Json(payload) = payload?;
    board
        .delete(&payload.email, &payload.password, &payload.title)
        .await?;
    Ok(Envelope::ok(Empty {}))
}

#[instrument(skip(board, payload))]
pub async fn read_messages(
    State(board): State<MessageService>,
    payload: Result<Json<ReadRequest>, JsonRejection>,
) -> Result<Json<Envelope<ReadResponse>>, AppError> {
    let Json(payload) = payload?;
    let messages = board
        .list_recent(&payload.email, &payload.password, payload.page)
        .await?;
    Ok(Envelope::ok(ReadResponse { messages }))
}
