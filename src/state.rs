use std::sync::Arc;

use axum::extract::FromRef;

use crate::services::ThreadDetailUseCase;

pub struct AppState<S> {
    pub detail: Arc<ThreadDetailUseCase<S>>,
}

impl<S> AppState<S> {
    pub fn new(detail: ThreadDetailUseCase<S>) -> Self {
        Self {
            detail: Arc::new(detail),
        }
    }
}

// Manual impl: cloning the state must not require `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            detail: Arc::clone(&self.detail),
        }
    }
}

impl<S> FromRef<AppState<S>> for Arc<ThreadDetailUseCase<S>> {
    fn from_ref(state: &AppState<S>) -> Self {
        Arc::clone(&state.detail)
    }
}
