use thiserror::Error;

/// A relayed file that does not satisfy the filename policy.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("file name `{name}` must use only ASCII letters, digits, `_` or `-`")]
    InvalidName { name: String },
    #[error("file `{name}` is not an accepted archive type (accepted: {accepted})")]
    UnsupportedExtension { name: String, accepted: String },
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidName { name } => format!(
                "`{name}` was not uploaded: use only letters, digits, `_` or `-` in the file name."
            ),
            Self::UnsupportedExtension { name, accepted } => {
                format!("`{name}` was not uploaded: the file must be a {accepted} archive.")
            }
        }
    }
}

/// Failure reported by a downstream collaborator (Slack, object storage, shortener).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IntegrationError {
    #[error("{service} transport failure: {message}")]
    Transport { service: &'static str, message: String },
    #[error("{service} responded with HTTP {status}: {detail}")]
    HttpStatus { service: &'static str, status: u16, detail: String },
    #[error("{service} api error: {message}")]
    Api { service: &'static str, message: String },
    #[error("{service} returned an unusable response: {message}")]
    InvalidResponse { service: &'static str, message: String },
}

impl IntegrationError {
    pub fn service(&self) -> &'static str {
        match self {
            Self::Transport { service, .. }
            | Self::HttpStatus { service, .. }
            | Self::Api { service, .. }
            | Self::InvalidResponse { service, .. } => service,
        }
    }
}

/// Errors surfaced to the webhook caller, one per HTTP status class.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("unauthorized: {message}")]
    Unauthorized { message: String, correlation_id: String },
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn unauthorized(message: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into(), correlation_id: correlation_id.into() }
    }

    pub fn bad_request(message: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into(), correlation_id: correlation_id.into() }
    }

    pub fn internal(message: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), correlation_id: correlation_id.into() }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized { .. } => 401,
            Self::BadRequest { .. } => 400,
            Self::Internal { .. } => 500,
        }
    }

    /// Body returned to the webhook caller. Details stay in the logs.
    pub fn response_body(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "Unauthorized",
            Self::BadRequest { .. } => "Bad Request",
            Self::Internal { .. } => "Internal Server Error",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::Unauthorized { correlation_id, .. }
            | Self::BadRequest { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}
