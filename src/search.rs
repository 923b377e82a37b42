//! Debounced search workflows.
//!
//! A [`SearchSession`] ties together one search box: the live term, the
//! debounce machine, the loader and the notice slot. Callers feed it
//! keystrokes through [`SearchSession::type_ahead`] and drive the cooldown
//! timer off [`SearchSession::next_deadline`] /
//! [`SearchSession::cooldown_elapsed`]; everything in between is internal.
//!
//! Person search is a single filtered collection read. Appointment search
//! fans out to both people collections with embedded appointments, joins the
//! branches (both must resolve — join, not race), unions the appointment
//! lists by id and sorts by date before enriching with both display names.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::debounce::Debouncer;
use crate::enrich::attach_names;
use crate::loader::{load_error_message, CollectionLoader};
use crate::models::{Appointment, Person, PersonRole};
use crate::notice::NoticeBoard;
use crate::query::QueryFilter;
use crate::transport::ApiTransport;

/// Which collection a search box is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Patients,
    Practitioners,
    Appointments,
}

/// What the last completed search produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchResults {
    #[default]
    Empty,
    People(Vec<Person>),
    Appointments(Vec<Appointment>),
}

impl SearchResults {
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::People(people) => people.len(),
            Self::Appointments(appointments) => appointments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Observable search state for one search box.
#[derive(Debug, Default)]
pub struct SearchState {
    /// The live term as the user types it.
    pub term: String,
    /// A search is in flight.
    pub searching: bool,
    /// Results of the most recently *completed* search. An in-flight search
    /// never clears this; it is replaced only on completion.
    pub results: SearchResults,
    /// The term the current `results` were produced for.
    pub last_term: String,
}

impl SearchState {
    /// Publish a completed search. Unconditional last-write-wins: in-flight
    /// requests are never cancelled, so a slow early response landing after
    /// a fast later one overwrites it. Known current behavior, pinned by
    /// `stale_response_still_overwrites_results` below.
    pub fn apply_results(&mut self, term: &str, results: SearchResults) {
        self.results = results;
        self.last_term = term.to_string();
    }

    fn clear(&mut self) {
        self.term.clear();
        self.last_term.clear();
        self.searching = false;
        self.results = SearchResults::Empty;
    }
}

/// Term-derived filter for the people collections: a two-word term splits
/// into first/last name matches, anything else goes through the generic
/// substring field.
pub fn person_filter(term: &str) -> QueryFilter {
    let mut words = term.split_whitespace();
    match (words.next(), words.next()) {
        (Some(first), Some(last)) => QueryFilter::new()
            .field("first_name_like", first)
            .field("last_name_like", last),
        _ => QueryFilter::new().field("q", term),
    }
}

/// One search box over the API.
pub struct SearchSession<T: ApiTransport> {
    pub(crate) loader: CollectionLoader<T>,
    debouncer: Debouncer,
    pub state: SearchState,
    pub notices: NoticeBoard,
}

impl<T: ApiTransport> SearchSession<T> {
    pub fn new(loader: CollectionLoader<T>) -> Self {
        Self {
            loader,
            debouncer: Debouncer::new(),
            state: SearchState::default(),
            notices: NoticeBoard::new(),
        }
    }

    pub fn with_debouncer(loader: CollectionLoader<T>, debouncer: Debouncer) -> Self {
        Self {
            loader,
            debouncer,
            state: SearchState::default(),
            notices: NoticeBoard::new(),
        }
    }

    pub fn loader(&self) -> &CollectionLoader<T> {
        &self.loader
    }

    /// The user typed. Runs a search right away when the debouncer allows
    /// it; otherwise the keystroke only updates the live term and the
    /// pending cooldown picks it up.
    pub async fn type_ahead(&mut self, kind: SearchKind, term: &str, now: Instant) {
        self.state.term = term.to_string();
        if let Some(term) = self.debouncer.submit(term, now) {
            self.run_search(kind, &term).await;
        }
    }

    /// The cooldown timer fired. Runs the catch-up search if the term moved
    /// while the window was open.
    pub async fn cooldown_elapsed(&mut self, kind: SearchKind, now: Instant) {
        let live_term = self.state.term.clone();
        if let Some(term) = self.debouncer.timer_fired(&live_term, now) {
            self.run_search(kind, &term).await;
        }
    }

    /// When the pending cooldown window closes, for timer scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Reset the box: term, results and debounce history.
    pub fn clear(&mut self) {
        self.state.clear();
        self.debouncer.reset();
    }

    async fn run_search(&mut self, kind: SearchKind, term: &str) {
        self.state.searching = true;
        let results = match kind {
            SearchKind::Patients => self.search_people(PersonRole::Patient, term).await,
            SearchKind::Practitioners => {
                self.search_people(PersonRole::Practitioner, term).await
            }
            SearchKind::Appointments => self.search_appointments(term).await,
        };
        self.state.searching = false;
        if let Some(results) = results {
            self.state.apply_results(term, results);
        }
    }

    async fn search_people(&mut self, role: PersonRole, term: &str) -> Option<SearchResults> {
        let filter = person_filter(term);
        let people: Vec<Person> = self
            .loader
            .load_or_notify(role.collection(), Some(&filter), &mut self.notices)
            .await?;
        tracing::debug!(%role, %term, hits = people.len(), "person search completed");
        Some(SearchResults::People(people))
    }

    /// Two-sided search: appointments of any patient matching the term,
    /// unioned with appointments of any practitioner matching it.
    async fn search_appointments(&mut self, term: &str) -> Option<SearchResults> {
        let patient_filter = person_filter(term).field("_embed", "appointments");
        let practitioner_filter = person_filter(term).field("_embed", "appointments");

        let (patients, practitioners) = tokio::join!(
            self.loader
                .load::<Person>(PersonRole::Patient.collection(), Some(&patient_filter)),
            self.loader.load::<Person>(
                PersonRole::Practitioner.collection(),
                Some(&practitioner_filter),
            ),
        );

        // Join semantics: nothing is published unless both branches loaded.
        let patients = match patients {
            Ok(people) => people,
            Err(err) => {
                tracing::debug!(%err, "patient branch of appointment search failed");
                self.notices
                    .error(load_error_message(PersonRole::Patient.collection()));
                return None;
            }
        };
        let practitioners = match practitioners {
            Ok(people) => people,
            Err(err) => {
                tracing::debug!(%err, "practitioner branch of appointment search failed");
                self.notices
                    .error(load_error_message(PersonRole::Practitioner.collection()));
                return None;
            }
        };

        let mut appointments = union_appointments(patients, practitioners);

        for role in [PersonRole::Patient, PersonRole::Practitioner] {
            if attach_names(&self.loader, &mut appointments, role)
                .await
                .is_err()
            {
                // Names stay absent for this side; the results still stand.
                self.notices.error(load_error_message(role.collection()));
            }
        }

        tracing::debug!(%term, hits = appointments.len(), "appointment search completed");
        Some(SearchResults::Appointments(appointments))
    }
}

/// Union of the embedded appointment lists from both branches, deduplicated
/// by id and sorted by date ascending (id breaks ties).
fn union_appointments(patients: Vec<Person>, practitioners: Vec<Person>) -> Vec<Appointment> {
    let mut by_id: BTreeMap<i64, Appointment> = BTreeMap::new();
    for person in patients.into_iter().chain(practitioners) {
        for appointment in person.appointments.into_iter().flatten() {
            by_id.entry(appointment.id).or_insert(appointment);
        }
    }
    let mut appointments: Vec<Appointment> = by_id.into_values().collect();
    appointments.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
    appointments
}
