use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format;

/// A registered patient. CPF and phone are held digits-only; the serde
/// adapters emit the formatted presentation forms on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "format::cpf")]
    pub cpf: String,
    #[serde(with = "format::br_date")]
    pub birth_date: NaiveDate,
    #[serde(with = "format::phone")]
    pub phone: String,
}

/// Create/update payload. `birth_date` stays raw text here; the directory
/// parses it so a bad date lands in the violation list with the rest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientPayload {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<String>,
    pub phone: Option<String>,
}
