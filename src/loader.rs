//! Collection reads over the transport seam.
//!
//! One loader per session; it builds the query URL, performs the read and
//! decodes the records. The `load_or_notify` form carries the user-facing
//! failure contract: on error it posts a Notice and withholds the records —
//! the caller's success path simply does not run. No retries; the user
//! re-triggers the action to retry.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{Appointment, NewAppointment};
use crate::notice::NoticeBoard;
use crate::query::{build_url, QueryFilter};
use crate::transport::ApiTransport;

pub struct CollectionLoader<T: ApiTransport> {
    transport: T,
    base: String,
}

impl<T: ApiTransport> CollectionLoader<T> {
    pub fn new(transport: T, base: impl Into<String>) -> Self {
        Self {
            transport,
            base: base.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Read a filtered collection and decode its records.
    pub async fn load<R: DeserializeOwned>(
        &self,
        path: &str,
        filter: Option<&QueryFilter>,
    ) -> Result<Vec<R>, ApiError> {
        let url = build_url(&self.base, path, filter)?;
        let value = self.transport.get_json(url).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Read a filtered collection; on failure post the user-facing Notice
    /// and yield nothing.
    pub async fn load_or_notify<R: DeserializeOwned>(
        &self,
        path: &str,
        filter: Option<&QueryFilter>,
        notices: &mut NoticeBoard,
    ) -> Option<Vec<R>> {
        match self.load(path, filter).await {
            Ok(records) => Some(records),
            Err(err) => {
                tracing::debug!(%path, %err, "collection load failed");
                notices.error(load_error_message(path));
                None
            }
        }
    }

    /// `POST /appointments`. The API assigns the id.
    pub async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, ApiError> {
        let url = build_url(&self.base, "appointments", None)?;
        let body =
            serde_json::to_value(appointment).map_err(|e| ApiError::Decode(e.to_string()))?;
        let created: Value = self.transport.post_json(url, &body).await?;
        serde_json::from_value(created).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Generic per-operation failure message; the error taxonomy deliberately
/// collapses here (timeout, 404 and 500 all read the same to the user).
pub fn load_error_message(path: &str) -> String {
    format!("There was an error getting {path} data.")
}
