//! Doctor endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Doctor, DoctorFilter, DoctorPayload};

#[derive(Deserialize)]
pub struct DoctorQuery {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub crm: Option<String>,
}

impl DoctorQuery {
    fn into_filter(self) -> DoctorFilter {
        DoctorFilter {
            name: self.name,
            specialty: self.specialty,
            crm: self.crm,
        }
    }
}

/// `POST /doctors` — register a doctor.
pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<DoctorPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Doctor>), ApiError> {
    let Json(payload) = payload?;
    let doctor = ctx.doctors.create(payload)?;
    Ok((StatusCode::CREATED, Json(doctor)))
}

/// `GET /doctors` — list doctors, optionally narrowed by filters.
pub async fn search(
    State(ctx): State<ApiContext>,
    query: Result<Query<DoctorQuery>, QueryRejection>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(ctx.doctors.search(&query.into_filter())?))
}

/// `GET /doctors/:id` — fetch one doctor.
pub async fn detail(
    State(ctx): State<ApiContext>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Doctor>, ApiError> {
    let Path(id) = id?;
    Ok(Json(ctx.doctors.get(id)?))
}

/// `PUT /doctors/:id` — replace a doctor record.
pub async fn update(
    State(ctx): State<ApiContext>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<DoctorPayload>, JsonRejection>,
) -> Result<Json<Doctor>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(ctx.doctors.update(id, payload)?))
}

/// `DELETE /doctors/:id` — remove a doctor record.
pub async fn remove(
    State(ctx): State<ApiContext>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    ctx.doctors.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
