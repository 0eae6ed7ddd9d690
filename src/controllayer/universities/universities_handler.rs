use tracing::{info, instrument};

use crate::{
    controllayer::helper::{
        responses::Envelope,
        validation::{check_empty, check_id_selector, check_number},
    },
    datalayer::CRUD::types::University,
    errors::errors::ServiceResult,
    handlers::request::EntityRequest,
    state::AppState,
};

const UNIVERSITY_ID: &str = "University id";
const UNIVERSITY_NAME: &str = "University name";
const USER_ID: &str = "User id";

#[instrument(skip(state))]
pub async fn find_all_universities(state: &AppState) -> ServiceResult<Envelope> {
    let universities: Vec<University> = state
        .universities
        .find_all()
        .await?
        .into_iter()
        .map(University::from)
        .collect();

    info!(count = universities.len(), "Universities fetched");
    Ok(Envelope::from_list(&universities))
}

#[instrument(skip(state))]
pub async fn find_by_university_id(
    state: &AppState,
    request: &EntityRequest,
) -> ServiceResult<Envelope> {
    let id = check_number(request.id.as_ref(), UNIVERSITY_ID, None)?;

    let university = state
        .universities
        .find_by_id(id)
        .await?
        .map(University::from);
    Ok(Envelope::from_option(university.as_ref()))
}

/// Universities linked to a user. The request `id` is the user's id.
#[instrument(skip(state))]
pub async fn find_by_user_id(state: &AppState, request: &EntityRequest) -> ServiceResult<Envelope> {
    let user_id = check_number(request.id.as_ref(), USER_ID, None)?;

    let universities: Vec<University> = state
        .universities
        .find_by_user_id(user_id)
        .await?
        .into_iter()
        .map(University::from)
        .collect();

    info!(user_id, count = universities.len(), "User universities fetched");
    Ok(Envelope::from_list(&universities))
}

#[instrument(skip(state))]
pub async fn create_new_university(
    state: &AppState,
    request: &EntityRequest,
) -> ServiceResult<Envelope> {
    let name = check_empty(request.name.as_ref(), UNIVERSITY_NAME)?;

    let university = University::from(state.universities.create(&name).await?);
    info!(university_id = university.id, "University created");
    Ok(Envelope::success(&university))
}

#[instrument(skip(state))]
pub async fn update_university_name(
    state: &AppState,
    request: &EntityRequest,
) -> ServiceResult<Envelope> {
    let id = check_number(
        request.id.as_ref(),
        UNIVERSITY_ID,
        Some(&state.forbidden.universities),
    )?;
    let name = check_empty(request.name.as_ref(), UNIVERSITY_NAME)?;

    let updated = state
        .universities
        .update(&University { id, name })
        .await?
        .map(University::from);
    Ok(Envelope::from_option(updated.as_ref()))
}

#[instrument(skip(state))]
pub async fn delete_university(
    state: &AppState,
    request: &EntityRequest,
) -> ServiceResult<Envelope> {
    let ids = check_id_selector(
        request.id.as_ref(),
        UNIVERSITY_ID,
        Some(&state.forbidden.universities),
    )?;

    let removed: Vec<University> = state
        .universities
        .delete(&ids)
        .await?
        .into_iter()
        .map(University::from)
        .collect();

    info!(deleted = removed.len(), "Universities deleted");
    Ok(Envelope::from_list(&removed))
}
