use serde::Serialize;

use super::Appointment;

/// Which side of an appointment a person is on.
///
/// Acts as the relation descriptor for enrichment and selection: it knows
/// the collection that holds this kind of person, the foreign key naming
/// them on an appointment, and the derived name slot that belongs to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    Patient,
    Practitioner,
}

impl PersonRole {
    /// Collection path on the API.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Patient => "patients",
            Self::Practitioner => "practitioners",
        }
    }

    /// Foreign-key field naming this role on an appointment.
    pub fn foreign_key(self) -> &'static str {
        match self {
            Self::Patient => "patient_id",
            Self::Practitioner => "practitioner_id",
        }
    }

    /// The person on the other side of an appointment.
    pub fn counterpart(self) -> Self {
        match self {
            Self::Patient => Self::Practitioner,
            Self::Practitioner => Self::Patient,
        }
    }

    /// Read this role's foreign key from an appointment.
    pub fn id_of(self, appointment: &Appointment) -> i64 {
        match self {
            Self::Patient => appointment.patient_id,
            Self::Practitioner => appointment.practitioner_id,
        }
    }

    /// Write this role's derived name slot on an appointment.
    pub fn set_name(self, appointment: &mut Appointment, name: String) {
        match self {
            Self::Patient => appointment.patient_name = Some(name),
            Self::Practitioner => appointment.practitioner_name = Some(name),
        }
    }
}

impl std::fmt::Display for PersonRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Practitioner => write!(f, "practitioner"),
        }
    }
}
