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
pub struct UserRegister {
    #[serde(default)]
    username: Option<String>,
    #[serde(default, deserialize_with = "secret_opt")]
    #[schema(value_type = Option<String>)]
    password: Option<SecretString>,
}

#[utoipa::path(
    post,
    path= "/register",
    request_body = UserRegister,
    responses (
        (status = 201, description = "User created", body = Message, content_type = "application/json"),
        (status = 400, description = "Missing field, weak password or username already exists", body = ErrorBody),
        (status = 415, description = "Content-Type is not application/json", body = ErrorBody),
        (status = 500, description = "Database or internal error", body = ErrorBody),
    ),
    tag= "credentials"
)]
// axum handler for register
#[instrument(skip(service, payload))]
pub async fn register(
    service: Extension<Arc<Service>>,
    payload: Result<Json<UserRegister>, JsonRejection>,
) -> Response {
    let user = match payload {
        Ok(Json(payload)) => payload,
        Err(err) => return rejection(&err),
    };

    debug!("user: {:?}", user);

    let password = user.password.as_ref().map(|p| p.expose_secret());

    match service
        .register(field(user.username.as_deref()), field(password))
        .await
    {
        Ok(_) => message(StatusCode::CREATED, "User created successfully"),
        Err(e) => credential_error(Operation::Register, &e),
    }
}
