//! Appointment endpoints.
//!
//! DELETE is a cancellation: the record stays behind with status
//! CANCELLED. Search takes camelCase query parameters and never turns
//! an empty result into an error.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Appointment, AppointmentFilter, AppointmentPayload};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentQuery {
    pub appointment_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
}

impl AppointmentQuery {
    fn into_filter(self) -> AppointmentFilter {
        AppointmentFilter {
            appointment_id: self.appointment_id,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
        }
    }
}

/// `POST /appointments` — book an appointment.
pub async fn schedule(
    State(ctx): State<ApiContext>,
    payload: Result<Json<AppointmentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let Json(payload) = payload?;
    let appointment = ctx.scheduler.schedule(payload)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// `GET /appointments` — search appointments.
pub async fn search(
    State(ctx): State<ApiContext>,
    query: Result<Query<AppointmentQuery>, QueryRejection>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(ctx.scheduler.search(&query.into_filter())?))
}

/// `PUT /appointments/:id` — replace the booking.
pub async fn update(
    State(ctx): State<ApiContext>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AppointmentPayload>, JsonRejection>,
) -> Result<Json<Appointment>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(ctx.scheduler.update(id, payload)?))
}

/// `DELETE /appointments/:id` — cancel an appointment.
pub async fn cancel(
    State(ctx): State<ApiContext>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    ctx.scheduler.cancel(id)?;
    Ok(StatusCode::NO_CONTENT)
}
