use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};
use tracing::{info, instrument};

use crate::{
    controllayer::{countries::countries_handler, helper::responses::respond},
    handlers::request::EntityRequest,
    routes::paths,
    state::AppState,
};

#[instrument(skip(state), fields(service = "/find-all-countries"))]
pub async fn find_all_countries(State(state): State<AppState>) -> Response {
    info!("Listing countries");
    respond(
        paths::FIND_ALL_COUNTRIES,
        countries_handler::find_all_countries(&state).await,
    )
}

#[instrument(skip(state, payload), fields(service = "/find-by-country-id"))]
pub async fn find_by_country_id(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(id = ?request.id, "Finding country");
    respond(
        paths::FIND_BY_COUNTRY_ID,
        countries_handler::find_by_country_id(&state, &request).await,
    )
}

#[instrument(skip(state, payload), fields(service = "/create-new-country"))]
pub async fn create_new_country(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(name = ?request.name, code = ?request.code, "Creating country");
    respond(
        paths::CREATE_NEW_COUNTRY,
        countries_handler::create_new_country(&state, &request).await,
    )
}

#[instrument(skip(state, payload), fields(service = "/update-country"))]
pub async fn update_country(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(id = ?request.id, "Updating country");
    respond(
        paths::UPDATE_COUNTRY,
        countries_handler::update_country(&state, &request).await,
    )
}

#[instrument(skip(state, payload), fields(service = "/delete-country"))]
pub async fn delete_country(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(id = ?request.id, "Deleting country");
    respond(
        paths::DELETE_COUNTRY,
        countries_handler::delete_country(&state, &request).await,
    )
}
