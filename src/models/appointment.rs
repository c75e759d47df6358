use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AppointmentStatus;
use crate::format;

/// A scheduled appointment. Doctor and patient are id references resolved
/// through the directories at write time, never embedded records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    #[serde(with = "format::br_date_time")]
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
}

/// Schedule/update payload. `scheduled_at` stays raw text here so the
/// scheduler can report format violations alongside missing fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentPayload {
    pub doctor_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub scheduled_at: Option<String>,
    pub status: Option<AppointmentStatus>,
}
