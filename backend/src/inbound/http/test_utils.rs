//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::UserId;
use crate::domain::ports::{
    AccessTokenError, MockAccessTokens, MockLoginService, MockSignupService, MockTaskCommand,
    MockTaskQuery, MockUserProfileQuery,
};

use super::state::{HttpState, HttpStatePorts};

/// Token accepted by [`accept_token`].
pub const VALID_TOKEN: &str = "valid-token";

/// Mock for every port in [`HttpState`]; set expectations, then build.
#[derive(Default)]
pub struct MockPorts {
    pub signup: MockSignupService,
    pub login: MockLoginService,
    pub profile: MockUserProfileQuery,
    pub tasks: MockTaskCommand,
    pub tasks_query: MockTaskQuery,
    pub tokens: MockAccessTokens,
}

impl MockPorts {
    /// Make [`VALID_TOKEN`] resolve to `user_id`; anything else is rejected.
    pub fn accept_token(mut self, user_id: UserId) -> Self {
        self.tokens.expect_verify().returning(move |token: &str| {
            if token == VALID_TOKEN {
                Ok(user_id)
            } else {
                Err(AccessTokenError::invalid("signature mismatch"))
            }
        });
        self
    }

    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            signup: Arc::new(self.signup),
            login: Arc::new(self.login),
            profile: Arc::new(self.profile),
            tasks: Arc::new(self.tasks),
            tasks_query: Arc::new(self.tasks_query),
            tokens: Arc::new(self.tokens),
        })
    }
}

/// Application with every route and the JSON error handler registered.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(super::json_config())
        .configure(super::configure)
}
