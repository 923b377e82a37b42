//! Frontdesk — client-side workflows for a clinic scheduling API.
//!
//! Browsing patients, practitioners and appointments against a json-server
//! style REST backend: debounced type-ahead search, query URL construction,
//! collection loading, relational name enrichment and person selection. The
//! backend itself and all rendering stay outside this crate; HTTP goes
//! through the [`transport::ApiTransport`] seam.

pub mod config;
pub mod debounce;
pub mod enrich;
pub mod error;
pub mod loader;
pub mod models;
pub mod notice;
pub mod query;
pub mod search;
pub mod selection;
pub mod transport;

pub use debounce::Debouncer;
pub use error::ApiError;
pub use loader::CollectionLoader;
pub use models::{full_name_of, Appointment, NewAppointment, Person, PersonRole};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use query::{build_url, FilterValue, QueryFilter};
pub use search::{SearchKind, SearchResults, SearchSession, SearchState};
pub use transport::{ApiTransport, HttpTransport, MockTransport};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries embedding this crate.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}

/// A ready-to-use session against the configured API.
pub fn default_session() -> SearchSession<HttpTransport> {
    SearchSession::new(CollectionLoader::new(
        transport::default_transport(),
        config::api_base_url(),
    ))
}
