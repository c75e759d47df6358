//! Patient endpoints.
//!
//! The search query keeps the legacy `nome` parameter name that
//! existing clients already send.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Patient, PatientFilter, PatientPayload};

#[derive(Deserialize)]
pub struct PatientQuery {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub cpf: Option<String>,
}

impl PatientQuery {
    fn into_filter(self) -> PatientFilter {
        PatientFilter {
            name: self.name,
            cpf: self.cpf,
        }
    }
}

/// `POST /patients` — register a patient.
pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<PatientPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let Json(payload) = payload?;
    let patient = ctx.patients.create(payload)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

/// `GET /patients` — list patients, optionally narrowed by filters.
pub async fn search(
    State(ctx): State<ApiContext>,
    query: Result<Query<PatientQuery>, QueryRejection>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(ctx.patients.search(&query.into_filter())?))
}

/// `GET /patients/:id` — fetch one patient.
pub async fn detail(
    State(ctx): State<ApiContext>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Patient>, ApiError> {
    let Path(id) = id?;
    Ok(Json(ctx.patients.get(id)?))
}

/// `PUT /patients/:id` — replace a patient record.
pub async fn update(
    State(ctx): State<ApiContext>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PatientPayload>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(ctx.patients.update(id, payload)?))
}

/// `DELETE /patients/:id` — remove a patient record.
pub async fn remove(
    State(ctx): State<ApiContext>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    ctx.patients.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
