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
pub struct UserLogin {
    #[serde(default)]
    username: Option<String>,
    #[serde(default, deserialize_with = "secret_opt")]
    #[schema(value_type = Option<String>)]
    password: Option<SecretString>,
}

#[utoipa::path(
    post,
    path= "/login",
    request_body = UserLogin,
    responses (
        (status = 200, description = "Login successful", body = Message, content_type = "application/json"),
        (status = 400, description = "Missing field or invalid credentials", body = ErrorBody),
        (status = 415, description = "Content-Type is not application/json", body = ErrorBody),
        (status = 500, description = "Database or internal error", body = ErrorBody),
    ),
    tag= "credentials"
)]
// axum handler for login
#[instrument(skip(service, payload))]
pub async fn login(
    service: Extension<Arc<Service>>,
    payload: Result<Json<UserLogin>, JsonRejection>,
) -> Response {
    let user = match payload {
        Ok(Json(payload)) => payload,
        Err(err) => return rejection(&err),
    };

    debug!("user: {:?}", user);

    let password = user.password.as_ref().map(|p| p.expose_secret());

    match service
        .login(field(user.username.as_deref()), field(password))
        .await
    {
        Ok(()) => {
            debug!("Login successful");

            message(StatusCode::OK, "Login successful")
        }
        Err(e) => {
            debug!("Login failed: {}", e);

            credential_error(Operation::Login, &e)
        }
    }
}
