//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates, so the in-memory wiring and
//! the request helpers live here instead of being repeated per file.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{App, test as actix_test, web};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use taskboard::Trace;
use taskboard::domain::{AccountService, TaskService};
use taskboard::inbound::http::state::{HttpState, HttpStatePorts};
use taskboard::inbound::http::{configure, json_config};
use taskboard::outbound::memory::{InMemoryTaskRepository, InMemoryUserRepository};
use taskboard::outbound::security::{Argon2PasswordHasher, JwtAccessTokens};

const SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

/// Real services over in-memory repositories.
pub fn in_memory_state() -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = Arc::new(
        JwtAccessTokens::new(SECRET, Duration::from_secs(3600), Arc::clone(&clock))
            .expect("secret is long enough"),
    );
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::clone(&tokens),
    ));
    let tasks = Arc::new(TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        clock,
    ));
    HttpState::new(HttpStatePorts {
        signup: accounts.clone(),
        login: accounts.clone(),
        profile: accounts,
        tasks: tasks.clone(),
        tasks_query: tasks,
        tokens,
    })
}

/// The production route table behind the trace middleware.
pub fn app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(in_memory_state()))
        .app_data(json_config())
        .wrap(Trace)
        .configure(configure)
}

/// Captured response: status, `trace-id` header and JSON body.
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

impl Reply {
    pub fn msg(&self) -> Option<&str> {
        self.body.get("msg").and_then(Value::as_str)
    }
}

pub async fn send<S>(app: &S, request: actix_test::TestRequest) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = actix_test::read_body_json(response).await;
    Reply {
        status,
        trace_id,
        body,
    }
}

pub fn with_token(request: actix_test::TestRequest, token: &str) -> actix_test::TestRequest {
    request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
}

pub async fn signup<S>(app: &S, name: &str, email: &str) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({"name": name, "email": email, "password": "secret-pw"}));
    send(app, request).await
}

/// Log in with the password used by [`signup`] and return the token.
pub async fn login<S>(app: &S, email: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"email": email, "password": "secret-pw"}));
    let reply = send(app, request).await;
    assert_eq!(reply.status, StatusCode::OK, "login failed: {}", reply.body);
    reply
        .body
        .get("token")
        .and_then(Value::as_str)
        .expect("token in login reply")
        .to_owned()
}
