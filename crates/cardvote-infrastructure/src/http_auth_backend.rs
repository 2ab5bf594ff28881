//! Auth backend talking to `/api/v1/auth/*`.
//!
//! Backends disagree on where they put the token, so the response is read as
//! loose JSON: the first of `token`, `accessToken`, `jwt`, `data.token` wins.

use async_trait::async_trait;
use cardvote_core::error::Result;
use cardvote_core::user::{AuthBackend, AuthOutcome, User};
use serde::Serialize;
use serde_json::Value;

use crate::http_client::ApiClient;

const REGISTER_PATH: &str = "/api/v1/auth/register";
const LOGIN_PATH: &str = "/api/v1/auth/login";

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    name: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

pub struct HttpAuthBackend {
    api: ApiClient,
}

impl HttpAuthBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Token carried by an auth response, if any.
pub fn extract_token(body: &Value) -> Option<String> {
    non_empty_str(body.get("token"))
        .or_else(|| non_empty_str(body.get("accessToken")))
        .or_else(|| non_empty_str(body.get("jwt")))
        .or_else(|| non_empty_str(body.pointer("/data/token")))
}

/// User carried by an auth response, if any.
fn extract_user(body: &Value) -> Option<User> {
    let user = body.get("user").or_else(|| body.pointer("/data/user"))?;
    let email = non_empty_str(user.get("email"))?;
    let name = non_empty_str(user.get("name"))
        .or_else(|| non_empty_str(user.get("displayName")))
        .unwrap_or_else(|| email.clone());
    Some(User::new(email, name))
}

/// Interprets a 2xx auth response.
///
/// An explicit `success: false` is honored; otherwise the presence of a
/// token decides. A successful outcome always carries both user and token.
pub fn parse_auth_response(body: &Value, email: &str, fallback_name: &str) -> AuthOutcome {
    let message = non_empty_str(body.get("message"));
    let declared = body.get("success").and_then(Value::as_bool);

    if declared == Some(false) {
        return AuthOutcome::failure(message.unwrap_or_else(|| "Authentication failed".to_string()));
    }

    match extract_token(body) {
        Some(token) => {
            let user = extract_user(body).unwrap_or_else(|| User::new(email, fallback_name));
            AuthOutcome::authenticated(message.unwrap_or_default(), user, token)
        }
        None => AuthOutcome::failure(
            message.unwrap_or_else(|| "Authentication response did not include a token".to_string()),
        ),
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn register(&self, email: &str, name: &str, password: &str) -> Result<AuthOutcome> {
        let body: Value = self
            .api
            .post_json(REGISTER_PATH, &RegisterRequest { email, name, password })
            .await?;
        Ok(parse_auth_response(&body, email, name))
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        let body: Value = self
            .api
            .post_json(LOGIN_PATH, &LoginRequest { email, password })
            .await?;
        Ok(parse_auth_response(&body, email, email))
    }
}
