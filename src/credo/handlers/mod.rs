//! Route handlers and the shared request/response shapes.
//!
//! Handlers only translate: JSON in, one [`CredentialService`] call, one
//! status code and body out.
//!
//! [`CredentialService`]: crate::credentials::CredentialService

pub mod health;
pub use self::health::health;

pub mod login;
pub use self::login::login;

pub mod register;
pub use self::register::register;

pub mod update;
pub use self::update::update;

use crate::credentials::{CredentialError, StoreError};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::error;
use utoipa::ToSchema;

pub const UNSUPPORTED_MEDIA_TYPE: &str =
    "Unsupported Media Type: Content-Type must be 'application/json'";
pub const INVALID_CREDENTIALS: &str = "Invalid login. Incorrect username or password.";
pub const USERNAME_EXISTS: &str = "Username already exists";

// Adapter-level kinds, outside the core taxonomy.
const KIND_UNSUPPORTED_MEDIA_TYPE: &str = "UnsupportedMediaType";
const KIND_INVALID_BODY: &str = "InvalidBody";

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Message {
    pub message: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

/// Which route produced an error, for the route-specific messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Register,
    Login,
    Update,
}

impl Operation {
    const fn missing_field(self) -> &'static str {
        match self {
            Self::Register | Self::Login => "Missing username or password",
            Self::Update => "Missing username, password, or new_password",
        }
    }

    const fn weak_password(self) -> &'static str {
        match self {
            Self::Update => {
                "New password must be at least 8 characters long and include at least 1 number"
            }
            Self::Register | Self::Login => {
                "Password must be at least 8 characters long and include at least 1 number"
            }
        }
    }
}

/// Deserialize an optional password straight into a [`SecretString`] so it
/// never shows up in `Debug` output or logs.
pub(crate) fn secret_opt<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

pub(crate) fn message(status: StatusCode, text: &str) -> Response {
    (
        status,
        Json(Message {
            message: text.to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn failure(status: StatusCode, kind: &str, text: String) -> Response {
    (
        status,
        Json(ErrorBody {
            error: text,
            kind: kind.to_string(),
        }),
    )
        .into_response()
}

/// Map a service failure to its status code and body.
pub(crate) fn credential_error(operation: Operation, err: &CredentialError) -> Response {
    let (status, text) = match err {
        CredentialError::MissingField => {
            (StatusCode::BAD_REQUEST, operation.missing_field().to_string())
        }
        CredentialError::WeakPassword => {
            (StatusCode::BAD_REQUEST, operation.weak_password().to_string())
        }
        CredentialError::UsernameTaken
        | CredentialError::Store(StoreError::DuplicateUsername(_)) => {
            (StatusCode::BAD_REQUEST, USERNAME_EXISTS.to_string())
        }
        CredentialError::InvalidCredentials => {
            (StatusCode::BAD_REQUEST, INVALID_CREDENTIALS.to_string())
        }
        // only when the account is deleted between authenticate and update
        CredentialError::Store(StoreError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "Account not found".to_string())
        }
        CredentialError::Store(StoreError::Database(e)) => {
            error!("Database error: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {e}"))
        }
        CredentialError::Internal(e) => {
            error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {e}"),
            )
        }
    };

    failure(status, err.kind().as_str(), text)
}

/// Map a body extraction failure: wrong content type is 415, anything else
/// that is not a well-formed JSON object of the expected shape is 400.
pub(crate) fn rejection(rejection: &JsonRejection) -> Response {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => failure(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            KIND_UNSUPPORTED_MEDIA_TYPE,
            UNSUPPORTED_MEDIA_TYPE.to_string(),
        ),
        other => failure(
            StatusCode::BAD_REQUEST,
            KIND_INVALID_BODY,
            format!("Invalid request body: {}", other.body_text()),
        ),
    }
}

/// Treat an absent field and an empty string the same way.
pub(crate) fn field(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}
