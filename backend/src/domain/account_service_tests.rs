//! Tests for the account service.

use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use super::*;
use crate::domain::ports::{
    AccessToken, MockAccessTokens, MockPasswordHasher, MockUserRepository,
};
use crate::domain::{ErrorCode, FieldValue, PasswordHash};
use rstest::rstest;

type Service = AccountService<MockUserRepository, MockPasswordHasher, MockAccessTokens>;

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockAccessTokens,
) -> Service {
    AccountService::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens))
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_owned())
}

fn signup_form() -> SignupForm {
    SignupForm::try_from_fields(text("John"), text("j@test.com"), text("1234"))
        .expect("valid signup form")
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_fields(text("j@test.com"), text(password))
        .expect("valid credentials")
}

fn stored_user() -> User {
    User::try_from_strings(UserId::random(), "John", "j@test.com", "$argon2id$stored")
        .expect("valid user")
}

#[tokio::test]
async fn register_hashes_password_and_inserts_user() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .withf(|email: &str| email == "j@test.com")
        .times(1)
        .return_once(|_| Ok(None));
    users
        .expect_insert()
        .withf(|user: &User| {
            user.password_hash().as_ref() == "$argon2id$hashed"
                && user.name().as_ref() == "John"
        })
        .times(1)
        .return_once(|_| Ok(()));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|password: &str| password == "1234")
        .times(1)
        .return_once(|_| Ok(PasswordHash::new("$argon2id$hashed").expect("hash")));

    let service = make_service(users, hasher, MockAccessTokens::new());
    service
        .register(signup_form())
        .await
        .expect("signup succeeds");
}

#[tokio::test]
async fn register_rejects_existing_email_before_hashing() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Ok(Some(stored_user())));
    users.expect_insert().never();
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().never();

    let service = make_service(users, hasher, MockAccessTokens::new());
    let err = service
        .register(signup_form())
        .await
        .expect_err("duplicate email");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "This email is already registered");
}

#[tokio::test]
async fn register_maps_insert_race_to_conflict() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert()
        .return_once(|_| Err(UserPersistenceError::duplicate_email("j@test.com")));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("$argon2id$hashed").expect("hash")));

    let service = make_service(users, hasher, MockAccessTokens::new());
    let err = service
        .register(signup_form())
        .await
        .expect_err("race loses");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn register_surfaces_repository_failure_as_internal() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Err(UserPersistenceError::connection("pool exhausted")));

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokens::new());
    let err = service
        .register(signup_form())
        .await
        .expect_err("repository down");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn login_issues_token_for_matching_password() {
    let user = stored_user();
    let user_id = *user.id();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(user)));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|password: &str, hash: &PasswordHash| {
            password == "1234" && hash.as_ref() == "$argon2id$stored"
        })
        .return_once(|_, _| Ok(true));
    let mut tokens = MockAccessTokens::new();
    tokens
        .expect_issue()
        .withf(move |id: &UserId| *id == user_id)
        .return_once(|_| Ok(AccessToken::new("signed")));

    let service = make_service(users, hasher, tokens);
    let outcome = service
        .login(&credentials("1234"))
        .await
        .expect("login succeeds");
    assert_eq!(outcome.token.as_str(), "signed");
    assert_eq!(outcome.user.id(), &user_id);
}

#[rstest]
#[case(None, false, "This email is not registered!!")]
#[case(Some(false), true, "Password incorrect!!")]
#[tokio::test]
async fn login_rejections_are_invalid_requests(
    #[case] password_matches: Option<bool>,
    #[case] user_exists: bool,
    #[case] expected: &str,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(user_exists.then(stored_user)));
    let mut hasher = MockPasswordHasher::new();
    if let Some(matches) = password_matches {
        hasher.expect_verify().return_once(move |_, _| Ok(matches));
    }
    let mut tokens = MockAccessTokens::new();
    tokens.expect_issue().never();

    let service = make_service(users, hasher, tokens);
    let err = service
        .login(&credentials("wrong"))
        .await
        .expect_err("login rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), expected);
}

#[tokio::test]
async fn login_treats_malformed_hash_as_internal() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Ok(Some(stored_user())));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .return_once(|_, _| Err(PasswordHashError::malformed_hash("bad phc")));

    let service = make_service(users, hasher, MockAccessTokens::new());
    let err = service
        .login(&credentials("1234"))
        .await
        .expect_err("malformed hash");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn profile_returns_stored_user() {
    let user = stored_user();
    let user_id = *user.id();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .withf(move |id: &UserId| *id == user_id)
        .return_once(move |_| Ok(Some(user)));

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokens::new());
    let profile = service
        .fetch_profile(&user_id)
        .await
        .expect("profile found");
    assert_eq!(profile.email().as_ref(), "j@test.com");
}

#[tokio::test]
async fn profile_for_unknown_user_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokens::new());
    let err = service
        .fetch_profile(&UserId::random())
        .await
        .expect_err("unknown user");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found");
}

/// Records where and under which trace identifier hashing ran.
#[derive(Default)]
struct RecordingHasher {
    seen: Mutex<Option<(ThreadId, Option<TraceId>)>>,
}

impl PasswordHasher for RecordingHasher {
    fn hash(&self, _password: &str) -> Result<PasswordHash, PasswordHashError> {
        *self.seen.lock().expect("recorder lock") =
            Some((thread::current().id(), TraceId::current()));
        PasswordHash::new("$argon2id$recorded")
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, _password: &str, _hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        Ok(true)
    }
}

struct CrashingHasher;

impl PasswordHasher for CrashingHasher {
    fn hash(&self, _password: &str) -> Result<PasswordHash, PasswordHashError> {
        std::panic::panic_any("hasher crashed")
    }

    fn verify(&self, _password: &str, _hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        std::panic::panic_any("hasher crashed")
    }
}

#[tokio::test]
async fn hashing_runs_on_blocking_pool_with_trace_id() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users.expect_insert().return_once(|_| Ok(()));
    let hasher = Arc::new(RecordingHasher::default());
    let service = AccountService::new(
        Arc::new(users),
        Arc::clone(&hasher),
        Arc::new(MockAccessTokens::new()),
    );

    let trace_id = TraceId::generate();
    TraceId::scope(trace_id, service.register(signup_form()))
        .await
        .expect("signup succeeds");

    let seen = *hasher.seen.lock().expect("recorder lock");
    let (thread_id, seen_trace) = seen.expect("hasher invoked");
    assert_ne!(thread_id, thread::current().id());
    assert_eq!(seen_trace, Some(trace_id));
}

#[tokio::test]
async fn crashed_hashing_task_is_internal_error() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users.expect_insert().never();
    let service = AccountService::new(
        Arc::new(users),
        Arc::new(CrashingHasher),
        Arc::new(MockAccessTokens::new()),
    );

    let err = service
        .register(signup_form())
        .await
        .expect_err("hashing task panicked");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(err.message().starts_with("password hashing task failed"));
}

#[tokio::test]
async fn crashed_verification_task_is_internal_error() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Ok(Some(stored_user())));
    let mut tokens = MockAccessTokens::new();
    tokens.expect_issue().never();
    let service = AccountService::new(Arc::new(users), Arc::new(CrashingHasher), Arc::new(tokens));

    let err = service
        .login(&credentials("1234"))
        .await
        .expect_err("verification task panicked");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
