use serde::{Deserialize, Serialize};

use super::Appointment;

/// A patient or practitioner record as served by the API.
///
/// Immutable once fetched, except for the derived `appointments` list the
/// selection workflow attaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    /// Present only on `_embed=appointments` responses or after selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointments: Option<Vec<Appointment>>,
}

impl Person {
    /// Display name: optional title, first name, last name, single spaces.
    pub fn full_name(&self) -> String {
        match &self.title {
            Some(title) => format!("{} {} {}", title, self.first_name, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Display name for a possibly-missing person. Returns `""` for `None` so
/// name lookups on unmatched ids fail gracefully.
pub fn full_name_of(person: Option<&Person>) -> String {
    person.map(Person::full_name).unwrap_or_default()
}
