use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{cars, countries, health, universities};
use crate::middleware::request_id::request_id_middleware;
use crate::state::AppState;

/// Route paths, shared by the router and the response counter labels
pub mod paths {
    pub const FIND_ALL_CARS: &str = "/find-all-cars";
    pub const FIND_BY_CAR_ID: &str = "/find-by-car-id";
    pub const CREATE_NEW_CAR: &str = "/create-new-car";
    pub const CHANGE_CAR_NAME: &str = "/change-car-name";
    pub const DELETE_CAR: &str = "/delete-car";

    pub const FIND_ALL_COUNTRIES: &str = "/find-all-countries";
    pub const FIND_BY_COUNTRY_ID: &str = "/find-by-country-id";
    pub const CREATE_NEW_COUNTRY: &str = "/create-new-country";
    pub const UPDATE_COUNTRY: &str = "/update-country";
    pub const DELETE_COUNTRY: &str = "/delete-country";

    pub const FIND_ALL_UNIVERSITIES: &str = "/find-all-universities";
    pub const FIND_BY_UNIVERSITY_ID: &str = "/find-by-university-id";
    pub const FIND_BY_USER_ID: &str = "/find-by-user-id";
    pub const CREATE_NEW_UNIVERSITY: &str = "/create-new-university";
    pub const UPDATE_UNIVERSITY_NAME: &str = "/update-university-name";
    pub const DELETE_UNIVERSITY: &str = "/delete-university";
}

/// Create the main application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    let car_routes = Router::new()
        .route(paths::FIND_ALL_CARS, post(cars::find_all_cars))
        .route(paths::FIND_BY_CAR_ID, post(cars::find_by_car_id))
        .route(paths::CREATE_NEW_CAR, post(cars::create_new_car))
        .route(paths::CHANGE_CAR_NAME, post(cars::change_car_name))
        .route(paths::DELETE_CAR, post(cars::delete_car));

    let country_routes = Router::new()
        .route(paths::FIND_ALL_COUNTRIES, post(countries::find_all_countries))
        .route(paths::FIND_BY_COUNTRY_ID, post(countries::find_by_country_id))
        .route(paths::CREATE_NEW_COUNTRY, post(countries::create_new_country))
        .route(paths::UPDATE_COUNTRY, post(countries::update_country))
        .route(paths::DELETE_COUNTRY, post(countries::delete_country));

    let university_routes = Router::new()
        .route(paths::FIND_ALL_UNIVERSITIES, post(universities::find_all_universities))
        .route(paths::FIND_BY_UNIVERSITY_ID, post(universities::find_by_university_id))
        .route(paths::FIND_BY_USER_ID, post(universities::find_by_user_id))
        .route(paths::CREATE_NEW_UNIVERSITY, post(universities::create_new_university))
        .route(paths::UPDATE_UNIVERSITY_NAME, post(universities::update_university_name))
        .route(paths::DELETE_UNIVERSITY, post(universities::delete_university));

    Router::new()
        .merge(health_routes)
        .merge(car_routes)
        .merge(country_routes)
        .merge(university_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
