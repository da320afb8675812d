//! Account endpoints.
//!
//! ```text
//! POST /signup  {"name":"John","email":"j@test.com","password":"1234"}
//! POST /login   {"email":"j@test.com","password":"1234"}
//! GET  /profile Authorization: Bearer <token>
//! ```
//!
//! Bodies are read as loose JSON so that missing, null and non-string
//! fields can be told apart and reported with the documented messages.

use std::num::FpCategory;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, FieldValue, LoginCredentials, SignupForm, User};

use super::ApiResult;
use super::auth::AuthenticatedUser;
use super::envelope::Envelope;
use super::error::ErrorEnvelope;
use super::schemas::{LoginResponseSchema, MessageResponseSchema, ProfileResponseSchema};
use super::state::HttpState;

const SIGNUP_OK: &str = "Congratulations!! Account has been created for you..";
const LOGIN_OK: &str = "Login successful..";
const PROFILE_OK: &str = "Profile found successfully..";

/// Classify a body field; `false` and numeric zero count as missing.
pub(crate) fn field(value: Option<Value>) -> FieldValue {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => FieldValue::Absent,
        Some(Value::Number(number))
            if number
                .as_f64()
                .is_some_and(|n| n.classify() == FpCategory::Zero) =>
        {
            FieldValue::Absent
        }
        Some(Value::String(text)) => FieldValue::Text(text),
        Some(_) => FieldValue::NonText,
    }
}

/// Body of `POST /signup`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "John")]
    pub name: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "j@test.com")]
    pub email: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "1234")]
    pub password: Option<Value>,
}

/// Body of `POST /login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "j@test.com")]
    pub email: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "1234")]
    pub password: Option<Value>,
}

/// Public view of an account.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserView {
    #[serde(rename = "_id")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
        }
    }
}

/// Account as returned by login, including the stored password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginUserView {
    #[serde(flatten)]
    pub user: UserView,
    /// Argon2id PHC string; never the plain-text password.
    pub password: String,
}

impl From<&User> for LoginUserView {
    fn from(user: &User) -> Self {
        Self {
            user: UserView::from(user),
            password: user.password_hash().as_ref().to_owned(),
        }
    }
}

#[derive(Serialize)]
struct LoginPayload {
    token: String,
    user: LoginUserView,
}

#[derive(Serialize)]
struct ProfilePayload {
    user: UserView,
}

fn invalid(err: impl std::fmt::Display) -> Error {
    Error::invalid_request(err.to_string())
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = MessageResponseSchema),
        (status = 400, description = "Validation failure or email taken", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let SignupRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let form =
        SignupForm::try_from_fields(field(name), field(email), field(password)).map_err(invalid)?;
    state.signup.register(form).await?;
    Ok(Envelope::message(SIGNUP_OK).into_response())
}

/// Exchange email and password for an access token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponseSchema),
        (status = 400, description = "Missing details, unknown email or wrong password", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_fields(field(email), field(password)).map_err(invalid)?;
    let outcome = state.login.login(&credentials).await?;
    let payload = LoginPayload {
        token: outcome.token.as_str().to_owned(),
        user: LoginUserView::from(&outcome.user),
    };
    Ok(Envelope::new(LOGIN_OK, payload).into_response())
}

/// Current user's profile.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponseSchema),
        (status = 400, description = "User not found", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "profile"
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let user = state.profile.fetch_profile(caller.user_id()).await?;
    let payload = ProfilePayload {
        user: UserView::from(&user),
    };
    Ok(Envelope::new(PROFILE_OK, payload).into_response())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
