use shared::error::ApiErrorBody;
use thiserror::Error;

use crate::action::ActionKind;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("promotions service answered with status {status}")]
    Status {
        status: u16,
        body: Option<serde_json::Value>,
    },
    #[error("request to promotions service failed: {0}")]
    Transport(String),
    #[error("unexpected response body from promotions service: {0}")]
    Decode(String),
    #[error("invalid promotions service url '{0}'")]
    InvalidUrl(String),
    /// Blank and dot-only ids would address the collection instead of a record.
    #[error("Invalid id '{0}'")]
    InvalidId(String),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The service's `{message}` body, if the failure carried one.
    pub fn error_body(&self) -> Option<ApiErrorBody> {
        match self {
            Self::Status {
                body: Some(body), ..
            } => ApiErrorBody::from_value(body),
            _ => None,
        }
    }

    /// Text to show the user: the service's message, or the local reason a
    /// request was never sent.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::InvalidId(_) => Some(self.to_string()),
            _ => self.error_body().map(|body| body.message),
        }
    }
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("{action} failed and the error response had no message: {source}")]
    MalformedErrorResponse {
        action: ActionKind,
        #[source]
        source: RequestError,
    },
}
