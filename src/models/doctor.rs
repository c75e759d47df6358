use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered doctor. CRM is the Brazilian medical license number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub crm: String,
    pub email: String,
}

/// Create/update payload. Every field is optional so validation can name
/// all violated fields in one pass instead of stopping at the first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorPayload {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub crm: Option<String>,
    pub email: Option<String>,
}
