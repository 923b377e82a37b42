//! Selection workflow: pick a person, pull up their appointment history.

use crate::enrich::attach_names;
use crate::loader::load_error_message;
use crate::models::{Appointment, NewAppointment, Person, PersonRole};
use crate::query::QueryFilter;
use crate::search::SearchSession;
use crate::transport::ApiTransport;

impl<T: ApiTransport> SearchSession<T> {
    /// Mark `person` as the selected entity: reset the search box, load
    /// their appointments sorted by date, enrich non-empty results with the
    /// counterpart's display names and store the list on the person. A load
    /// failure posts the Notice and leaves the list unattached.
    pub async fn select(&mut self, mut person: Person, role: PersonRole) -> Person {
        self.clear();

        let filter = QueryFilter::new()
            .field(role.foreign_key(), person.id)
            .field("_sort", "date");

        let loaded: Option<Vec<Appointment>> = self
            .loader
            .load_or_notify("appointments", Some(&filter), &mut self.notices)
            .await;
        let Some(mut appointments) = loaded else {
            return person;
        };

        if !appointments.is_empty()
            && attach_names(&self.loader, &mut appointments, role.counterpart())
                .await
                .is_err()
        {
            self.notices
                .error(load_error_message(role.counterpart().collection()));
        }

        person.appointments = Some(appointments);
        person
    }

    /// Book a new appointment, surfacing the outcome as a Notice.
    pub async fn add_appointment(&mut self, appointment: &NewAppointment) -> Option<Appointment> {
        match self.loader.create_appointment(appointment).await {
            Ok(created) => {
                self.notices.success("Appointment added.");
                Some(created)
            }
            Err(err) => {
                tracing::debug!(%err, "appointment creation failed");
                self.notices
                    .error("There was an error adding the new appointment.");
                None
            }
        }
    }
}
