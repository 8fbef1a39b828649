//! Profile management handlers

use crate::api::rest::extract::ApiJson;
use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use profiles_types::{Parameters, Profile, ProfileParameter, ValidationResult};
use serde::Deserialize;

/// Update profile request
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub parameters: Parameters,
}

/// Permission validation request
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub actions: Vec<String>,
}

/// List all profiles
pub async fn list_profiles(State(state): State<AppState>) -> ApiResult<Json<Vec<Profile>>> {
    let profiles = state.profiles.list_profiles().await?;
    Ok(Json(profiles))
}

/// Get a specific profile, served from the cache when possible
pub async fn get_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Profile>> {
    let parameter = state.cache.get_parameter(&name).await?;
    Ok(Json(Profile::from(parameter)))
}

/// Create a new profile
pub async fn create_profile(
    State(state): State<AppState>,
    ApiJson(profile): ApiJson<Profile>,
) -> ApiResult<impl IntoResponse> {
    let created = state.profiles.add_profile(profile).await?;
    let location = format!("/api/v1/profiles/{}", created.name);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// Replace the parameters of an existing profile
pub async fn update_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> ApiResult<Json<Profile>> {
    let updated = state
        .profiles
        .update_profile(&name, request.parameters)
        .await?;

    // Keep a cached copy from serving the old parameters
    state
        .cache
        .set_parameter(ProfileParameter::from(updated.clone()))
        .await?;

    Ok(Json(updated))
}

/// Delete a profile
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    state.profiles.delete_profile(&name).await?;
    state.cache.remove_parameter(&name).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Validate actions against a profile
pub async fn validate_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ApiJson(request): ApiJson<ValidateRequest>,
) -> ApiResult<Json<ValidationResult>> {
    let result = state
        .cache
        .validate_permissions(&name, &request.actions)
        .await?;
    Ok(Json(result))
}
