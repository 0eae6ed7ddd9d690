use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};
use tracing::{info, instrument};

use crate::{
    controllayer::{helper::responses::respond, universities::universities_handler},
    handlers::request::EntityRequest,
    routes::paths,
    state::AppState,
};

#[instrument(skip(state), fields(service = "/find-all-universities"))]
pub async fn find_all_universities(State(state): State<AppState>) -> Response {
    info!("Listing universities");
    respond(
        paths::FIND_ALL_UNIVERSITIES,
        universities_handler::find_all_universities(&state).await,
    )
}

#[instrument(skip(state, payload), fields(service = "/find-by-university-id"))]
pub async fn find_by_university_id(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(id = ?request.id, "Finding university");
    respond(
        paths::FIND_BY_UNIVERSITY_ID,
        universities_handler::find_by_university_id(&state, &request).await,
    )
}

/// POST /find-by-user-id
/// Universities a user is linked to
#[instrument(skip(state, payload), fields(service = "/find-by-user-id"))]
pub async fn find_by_user_id(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(user_id = ?request.id, "Finding universities for user");
    respond(
        paths::FIND_BY_USER_ID,
        universities_handler::find_by_user_id(&state, &request).await,
    )
}

#[instrument(skip(state, payload), fields(service = "/create-new-university"))]
pub async fn create_new_university(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(name = ?request.name, "Creating university");
    respond(
        paths::CREATE_NEW_UNIVERSITY,
        universities_handler::create_new_university(&state, &request).await,
    )
}

#[instrument(skip(state, payload), fields(service = "/update-university-name"))]
pub async fn update_university_name(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(id = ?request.id, name = ?request.name, "Renaming university");
    respond(
        paths::UPDATE_UNIVERSITY_NAME,
        universities_handler::update_university_name(&state, &request).await,
    )
}

#[instrument(skip(state, payload), fields(service = "/delete-university"))]
pub async fn delete_university(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(id = ?request.id, "Deleting university");
    respond(
        paths::DELETE_UNIVERSITY,
        universities_handler::delete_university(&state, &request).await,
    )
}
