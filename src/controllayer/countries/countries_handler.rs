use tracing::{info, instrument};

use crate::{
    controllayer::helper::{
        responses::Envelope,
        validation::{check_empty, check_id_selector, check_number},
    },
    datalayer::CRUD::types::{Country, NewCountry},
    errors::errors::ServiceResult,
    handlers::request::EntityRequest,
    state::AppState,
};

const COUNTRY_ID: &str = "Country id";
const COUNTRY_NAME: &str = "Country name";
const COUNTRY_CODE: &str = "Country code";

#[instrument(skip(state))]
pub async fn find_all_countries(state: &AppState) -> ServiceResult<Envelope> {
    let countries: Vec<Country> = state
        .countries
        .find_all()
        .await?
        .into_iter()
        .map(Country::from)
        .collect();

    info!(count = countries.len(), "Countries fetched");
    Ok(Envelope::from_list(&countries))
}

#[instrument(skip(state))]
pub async fn find_by_country_id(
    state: &AppState,
    request: &EntityRequest,
) -> ServiceResult<Envelope> {
    let id = check_number(request.id.as_ref(), COUNTRY_ID, None)?;

    let country = state.countries.find_by_id(id).await?.map(Country::from);
    Ok(Envelope::from_option(country.as_ref()))
}

#[instrument(skip(state))]
pub async fn create_new_country(
    state: &AppState,
    request: &EntityRequest,
) -> ServiceResult<Envelope> {
    let name = check_empty(request.name.as_ref(), COUNTRY_NAME)?;
    let code = check_empty(request.code.as_ref(), COUNTRY_CODE)?;

    let country = Country::from(state.countries.create(&NewCountry { name, code }).await?);
    info!(country_id = country.id, "Country created");
    Ok(Envelope::success(&country))
}

/// Replace a country's name and code. Both fields are required.
#[instrument(skip(state))]
pub async fn update_country(state: &AppState, request: &EntityRequest) -> ServiceResult<Envelope> {
    let id = check_number(
        request.id.as_ref(),
        COUNTRY_ID,
        Some(&state.forbidden.countries),
    )?;
    let name = check_empty(request.name.as_ref(), COUNTRY_NAME)?;
    let code = check_empty(request.code.as_ref(), COUNTRY_CODE)?;

    let updated = state
        .countries
        .update(&Country { id, name, code })
        .await?
        .map(Country::from);
    Ok(Envelope::from_option(updated.as_ref()))
}

#[instrument(skip(state))]
pub async fn delete_country(state: &AppState, request: &EntityRequest) -> ServiceResult<Envelope> {
    let ids = check_id_selector(
        request.id.as_ref(),
        COUNTRY_ID,
        Some(&state.forbidden.countries),
    )?;

    let removed: Vec<Country> = state
        .countries
        .delete(&ids)
        .await?
        .into_iter()
        .map(Country::from)
        .collect();

    info!(deleted = removed.len(), "Countries deleted");
    Ok(Envelope::from_list(&removed))
}
