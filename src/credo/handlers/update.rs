use super::{ErrorBody, Message, Operation, credential_error, field, message, rejection, secret_opt};
use crate::credo::Service;
use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
pub struct UserUpdate {
    #[serde(default)]
    username: Option<String>,
    /// Current password.
    #[serde(default, deserialize_with = "secret_opt")]
    #[schema(value_type = Option<String>)]
    password: Option<SecretString>,
    #[serde(default, deserialize_with = "secret_opt")]
    #[schema(value_type = Option<String>)]
    new_password: Option<SecretString>,
}

#[utoipa::path(
    patch,
    path= "/update",
    request_body = UserUpdate,
    responses (
        (status = 200, description = "Password updated", body = Message, content_type = "application/json"),
        (status = 400, description = "Missing field, weak new password or invalid credentials", body = ErrorBody),
        (status = 404, description = "Account disappeared before the update", body = ErrorBody),
        (status = 415, description = "Content-Type is not application/json", body = ErrorBody),
        (status = 500, description = "Database or internal error", body = ErrorBody),
    ),
    tag= "credentials"
)]
// axum handler for password change
#[instrument(skip(service, payload))]
pub async fn update(
    service: Extension<Arc<Service>>,
    payload: Result<Json<UserUpdate>, JsonRejection>,
) -> Response {
    let user = match payload {
        Ok(Json(payload)) => payload,
        Err(err) => return rejection(&err),
    };

    debug!("user: {:?}", user);

    let password = user.password.as_ref().map(|p| p.expose_secret());
    let new_password = user.new_password.as_ref().map(|p| p.expose_secret());

    match service
        .change_password(
            field(user.username.as_deref()),
            field(password),
            field(new_password),
        )
        .await
    {
        Ok(()) => message(StatusCode::OK, "Password updated successfully"),
        Err(e) => credential_error(Operation::Update, &e),
    }
}
