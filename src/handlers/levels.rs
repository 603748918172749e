// src/handlers/levels.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use geo::Point;
use std::sync::Arc;
use validator::Validate;

use crate::{
    error::AppError,
    models::{admin::AvailableLevelsResponse, coordinates::Coordinates},
    store::{BoundaryStore, COUNTRY_FIELD, GID_FIELD},
};

/// Lists the ADM levels that have a dataset on disk for the country
/// containing the given point. An empty list is a valid answer; only a
/// point outside all country outlines is a 404.
pub async fn available_levels(
    State(store): State<Arc<BoundaryStore>>,
    Query(params): Query<Coordinates>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = params.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let point = Point::new(params.longitude, params.latitude);
    let country = store.country_at(point).ok_or_else(|| {
        AppError::NotFound("No matching polygon found for the given coordinates.".to_string())
    })?;
    let gid = country
        .attribute(GID_FIELD)
        .ok_or_else(|| {
            AppError::InternalServerError(format!("country outline is missing {GID_FIELD}"))
        })?
        .to_string();

    let available_levels = store
        .available_levels(&gid)?
        .into_iter()
        .map(|level| format!("ADM_{level}"))
        .collect();

    Ok(Json(AvailableLevelsResponse {
        country: country
            .attribute(COUNTRY_FIELD)
            .unwrap_or(gid.as_str())
            .to_string(),
        gid,
        available_levels,
    }))
}
