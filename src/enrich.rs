//! Relational name enrichment.
//!
//! Appointments reference people by id only. Enrichment collects the
//! distinct id set for one side of a batch of appointments, fetches the
//! referenced collection in a single filtered read, and attaches each
//! person's display name to the matching appointments. Purely additive and
//! idempotent; an id with no matching person simply keeps an empty name
//! slot.
//!
//! Fetched people are indexed by id before attachment, so this is O(n + m)
//! over n appointments and m people — fine well past the hundreds of
//! records this client is built for.

use std::collections::{BTreeSet, HashMap};

use crate::error::ApiError;
use crate::loader::CollectionLoader;
use crate::models::{Appointment, Person, PersonRole};
use crate::query::QueryFilter;
use crate::transport::ApiTransport;

/// Attach `role`'s display names to every appointment in the batch.
pub async fn attach_names<T: ApiTransport>(
    loader: &CollectionLoader<T>,
    appointments: &mut [Appointment],
    role: PersonRole,
) -> Result<(), ApiError> {
    if appointments.is_empty() {
        return Ok(());
    }

    // Distinct, sorted id set keeps the batched URL deterministic.
    let ids: BTreeSet<i64> = appointments.iter().map(|a| role.id_of(a)).collect();
    let filter = QueryFilter::new().field("id", ids.into_iter().collect::<Vec<_>>());

    let people: Vec<Person> = loader.load(role.collection(), Some(&filter)).await?;
    let names: HashMap<i64, String> =
        people.iter().map(|p| (p.id, p.full_name())).collect();

    let mut matched = 0usize;
    for appointment in appointments.iter_mut() {
        if let Some(name) = names.get(&role.id_of(appointment)) {
            role.set_name(appointment, name.clone());
            matched += 1;
        }
    }
    tracing::debug!(%role, matched, total = appointments.len(), "attached names");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;

    const BASE: &str = "http://localhost:3001";

    fn appointments(patient_ids: &[i64]) -> Vec<Appointment> {
        patient_ids
            .iter()
            .enumerate()
            .map(|(i, pid)| {
                serde_json::from_value(json!({
                    "id": i as i64 + 1,
                    "date": "2016-06-26T01:10:08Z",
                    "practitioner_id": 1,
                    "patient_id": pid,
                }))
                .unwrap()
            })
            .collect()
    }

    fn patients() -> serde_json::Value {
        json!([
            {"id": 3, "first_name": "Red", "last_name": "Guava"},
            {"id": 5, "first_name": "Blue", "last_name": "Plum"},
        ])
    }

    #[tokio::test]
    async fn attaches_names_by_foreign_key() {
        let loader = CollectionLoader::new(
            MockTransport::new().route("/patients", patients()),
            BASE,
        );
        let mut batch = appointments(&[3, 5]);
        attach_names(&loader, &mut batch, PersonRole::Patient)
            .await
            .unwrap();
        assert_eq!(batch[0].patient_name.as_deref(), Some("Red Guava"));
        assert_eq!(batch[1].patient_name.as_deref(), Some("Blue Plum"));
        assert!(batch[0].practitioner_name.is_none());
    }

    #[tokio::test]
    async fn fetches_the_distinct_id_set_in_one_call() {
        let loader = CollectionLoader::new(
            MockTransport::new().route("/patients", patients()),
            BASE,
        );
        let mut batch = appointments(&[5, 3, 5, 3, 5]);
        attach_names(&loader, &mut batch, PersonRole::Patient)
            .await
            .unwrap();
        assert_eq!(
            loader.transport().requests(),
            vec!["http://localhost:3001/patients?id=3&id=5"],
        );
    }

    #[tokio::test]
    async fn unmatched_foreign_key_is_tolerated() {
        let loader = CollectionLoader::new(
            MockTransport::new().route("/patients", patients()),
            BASE,
        );
        let mut batch = appointments(&[3, 42]);
        attach_names(&loader, &mut batch, PersonRole::Patient)
            .await
            .unwrap();
        assert_eq!(batch[0].patient_name.as_deref(), Some("Red Guava"));
        assert!(batch[1].patient_name.is_none());
    }

    #[tokio::test]
    async fn enrichment_is_idempotent() {
        let loader = CollectionLoader::new(
            MockTransport::new().route("/patients", patients()),
            BASE,
        );
        let mut batch = appointments(&[3, 5]);
        attach_names(&loader, &mut batch, PersonRole::Patient)
            .await
            .unwrap();
        let once = batch.clone();
        attach_names(&loader, &mut batch, PersonRole::Patient)
            .await
            .unwrap();
        for (first, second) in once.iter().zip(&batch) {
            assert_eq!(first.patient_name, second.patient_name);
            assert_eq!(first.practitioner_name, second.practitioner_name);
        }
    }

    #[tokio::test]
    async fn empty_batch_issues_no_request() {
        let loader = CollectionLoader::new(MockTransport::new(), BASE);
        let mut batch: Vec<Appointment> = Vec::new();
        attach_names(&loader, &mut batch, PersonRole::Practitioner)
            .await
            .unwrap();
        assert!(loader.transport().requests().is_empty());
    }
}
