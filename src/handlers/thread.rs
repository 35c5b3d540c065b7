use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, services::ThreadDetailUseCase, store::ContentStore};

/// Get a thread with its comments and their replies.
/// Soft-deleted comments and replies are shown with placeholder content.
pub async fn get_thread_detail<S: ContentStore + 'static>(
    State(detail): State<Arc<ThreadDetailUseCase<S>>>,
    Path(thread_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let thread = detail.execute(&thread_id).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": { "thread": thread },
    })))
}
