use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An appointment record as served by the API.
///
/// `patient_name` / `practitioner_name` are enrichment decorations attached
/// after a batched lookup of the referenced people; they never come from the
/// API itself and are additive only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub practitioner_id: i64,
    pub patient_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practitioner_name: Option<String>,
}

/// Body for `POST /appointments`. The API assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub date: DateTime<Utc>,
    pub practitioner_id: i64,
    pub patient_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_record() {
        let a: Appointment = serde_json::from_str(
            r#"{"id":1,"date":"2016-06-26T01:10:08.519Z","practitioner_id":1,"patient_id":1}"#,
        )
        .unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(a.patient_id, 1);
        assert!(a.patient_name.is_none());
        assert!(a.practitioner_name.is_none());
    }

    #[test]
    fn serializing_skips_unattached_names() {
        let a: Appointment = serde_json::from_str(
            r#"{"id":1,"date":"2016-06-26T01:10:08.519Z","practitioner_id":1,"patient_id":1}"#,
        )
        .unwrap();
        let json = serde_json::to_string(&a).unwrap();
        assert!(!json.contains("patient_name"));
        assert!(!json.contains("practitioner_name"));
    }
}
