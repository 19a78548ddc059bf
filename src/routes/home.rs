//! Greeting handler for the root route.

use axum::extract::State;

use crate::state::AppState;

/// Root handler.
///
/// Returns the fixed greeting as plain text, regardless of headers or query
/// parameters supplied.
pub async fn index(State(state): State<AppState>) -> &'static str {
    state.service.greeting()
}
