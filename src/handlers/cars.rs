use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};
use tracing::{info, instrument};

use crate::{
    controllayer::{cars::cars_handler, helper::responses::respond},
    handlers::request::EntityRequest,
    routes::paths,
    state::AppState,
};

/// POST /find-all-cars
#[instrument(skip(state), fields(service = "/find-all-cars"))]
pub async fn find_all_cars(State(state): State<AppState>) -> Response {
    info!("Listing cars");
    respond(paths::FIND_ALL_CARS, cars_handler::find_all_cars(&state).await)
}

/// POST /find-by-car-id
#[instrument(skip(state, payload), fields(service = "/find-by-car-id"))]
pub async fn find_by_car_id(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(id = ?request.id, "Finding car");
    respond(
        paths::FIND_BY_CAR_ID,
        cars_handler::find_by_car_id(&state, &request).await,
    )
}

/// POST /create-new-car
#[instrument(skip(state, payload), fields(service = "/create-new-car"))]
pub async fn create_new_car(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(name = ?request.name, "Creating car");
    respond(
        paths::CREATE_NEW_CAR,
        cars_handler::create_new_car(&state, &request).await,
    )
}

/// POST /change-car-name
#[instrument(skip(state, payload), fields(service = "/change-car-name"))]
pub async fn change_car_name(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(id = ?request.id, name = ?request.name, "Renaming car");
    respond(
        paths::CHANGE_CAR_NAME,
        cars_handler::change_car_name(&state, &request).await,
    )
}

/// POST /delete-car
#[instrument(skip(state, payload), fields(service = "/delete-car"))]
pub async fn delete_car(
    State(state): State<AppState>,
    payload: Result<Json<EntityRequest>, JsonRejection>,
) -> Response {
    let request = EntityRequest::from_payload(payload);
    info!(id = ?request.id, "Deleting car");
    respond(paths::DELETE_CAR, cars_handler::delete_car(&state, &request).await)
}
