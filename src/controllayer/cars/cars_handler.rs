use tracing::{info, instrument};

use crate::{
    controllayer::helper::{
        responses::Envelope,
        validation::{check_empty, check_id_selector, check_number},
    },
    datalayer::CRUD::types::Car,
    errors::errors::ServiceResult,
    handlers::request::EntityRequest,
    state::AppState,
};

const CAR_ID: &str = "Car id";
const CAR_NAME: &str = "Car name";

#[instrument(skip(state))]
pub async fn find_all_cars(state: &AppState) -> ServiceResult<Envelope> {
    let cars: Vec<Car> = state
        .cars
        .find_all()
        .await?
        .into_iter()
        .map(Car::from)
        .collect();

    info!(count = cars.len(), "Cars fetched");
    Ok(Envelope::from_list(&cars))
}

#[instrument(skip(state))]
pub async fn find_by_car_id(state: &AppState, request: &EntityRequest) -> ServiceResult<Envelope> {
    let id = check_number(request.id.as_ref(), CAR_ID, None)?;

    let car = state.cars.find_by_id(id).await?.map(Car::from);
    Ok(Envelope::from_option(car.as_ref()))
}

#[instrument(skip(state))]
pub async fn create_new_car(state: &AppState, request: &EntityRequest) -> ServiceResult<Envelope> {
    let name = check_empty(request.name.as_ref(), CAR_NAME)?;

    let car = Car::from(state.cars.create(&name).await?);
    info!(car_id = car.id, "Car created");
    Ok(Envelope::success(&car))
}

/// Rename a car. Protected cars are rejected before the store is touched.
#[instrument(skip(state))]
pub async fn change_car_name(state: &AppState, request: &EntityRequest) -> ServiceResult<Envelope> {
    let id = check_number(request.id.as_ref(), CAR_ID, Some(&state.forbidden.cars))?;
    let name = check_empty(request.name.as_ref(), CAR_NAME)?;

    let updated = state.cars.update(&Car { id, name }).await?.map(Car::from);
    Ok(Envelope::from_option(updated.as_ref()))
}

/// Delete one car or a list of cars; any protected id rejects the whole request.
#[instrument(skip(state))]
pub async fn delete_car(state: &AppState, request: &EntityRequest) -> ServiceResult<Envelope> {
    let ids = check_id_selector(request.id.as_ref(), CAR_ID, Some(&state.forbidden.cars))?;

    let removed: Vec<Car> = state
        .cars
        .delete(&ids)
        .await?
        .into_iter()
        .map(Car::from)
        .collect();

    info!(deleted = removed.len(), "Cars deleted");
    Ok(Envelope::from_list(&removed))
}
