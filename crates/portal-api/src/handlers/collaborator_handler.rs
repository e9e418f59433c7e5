//! Authenticated collaborator handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use domain::CollaboratorResponse;

use crate::middleware::CurrentCollaborator;
use crate::state::AppState;

/// Routes that require a bearer token
pub fn collaborator_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_current_collaborator))
}

/// Profile of the authenticated collaborator
#[utoipa::path(
    get,
    path = "/api/collaborators/me",
    tag = "Collaborators",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current collaborator profile", body = CollaboratorResponse),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn get_current_collaborator(
    Extension(current): Extension<CurrentCollaborator>,
    State(state): State<AppState>,
) -> AppResult<Json<CollaboratorResponse>> {
    let collaborator = state.auth.profile(&current.code).await?;
    Ok(Json(CollaboratorResponse::from(collaborator)))
}
