//! Failures of a weather run, split by how far they reach.
//!
//! [`DirectoryError`] ends the run. [`FetchError`] and [`WriteError`] only end
//! the processing of one district and end up in the run report as a
//! [`DistrictError`].

use thiserror::Error;

use crate::models::DistrictId;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("District directory unavailable: {0}")]
    Unavailable(String),

    #[error("No districts found")]
    Empty,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid location name {location:?}")]
    InvalidLocation { location: String },

    /// Connection, TLS or timeout failure. `message` is the cause chain of the
    /// client error with the request URL stripped, since it carries the API key.
    #[error("Error fetching weather data for {location}: {message}")]
    Transport { location: String, message: String },

    #[error("Error fetching weather data for {location}: {status} {body}")]
    Remote {
        location: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected weather payload for {location}: {reason}")]
    Malformed { location: String, reason: String },
}

impl FetchError {
    pub fn location(&self) -> &str {
        match self {
            FetchError::InvalidLocation { location }
            | FetchError::Transport { location, .. }
            | FetchError::Remote { location, .. }
            | FetchError::Malformed { location, .. } => location,
        }
    }
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Error encoding weather data for district {district_id}: {source}")]
    Encode {
        district_id: DistrictId,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error updating weather data for district {district_id}: {message}")]
    Transport {
        district_id: DistrictId,
        message: String,
    },

    #[error("Error updating weather data for district {district_id}: {status} {body}")]
    Rejected {
        district_id: DistrictId,
        status: u16,
        body: String,
    },
}

impl WriteError {
    pub fn district_id(&self) -> &DistrictId {
        match self {
            WriteError::Encode { district_id, .. }
            | WriteError::Transport { district_id, .. }
            | WriteError::Rejected { district_id, .. } => district_id,
        }
    }
}

/// Renders `err` followed by each of its sources, skipping a source whose text
/// the message already contains.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Why a single district was not updated in a run.
#[derive(Error, Debug)]
pub enum DistrictError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
