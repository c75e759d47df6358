use uuid::Uuid;

/// Doctor search filters. Provided fields are substring matches combined
/// with AND; an empty filter means "list everything".
#[derive(Debug, Clone, Default)]
pub struct DoctorFilter {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub crm: Option<String>,
}

impl DoctorFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.specialty.is_none() && self.crm.is_none()
    }
}

/// Patient search filters: name substring, CPF exact (digits-only).
#[derive(Debug, Clone, Default)]
pub struct PatientFilter {
    pub name: Option<String>,
    pub cpf: Option<String>,
}

impl PatientFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cpf.is_none()
    }
}

/// Appointment search filters, applied with strict precedence:
/// appointment id wins outright, then patient+doctor, then either alone.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub appointment_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
}
