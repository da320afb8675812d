//! Pure shape checks for email addresses and record identifiers.

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // local part, a single '@', then dot-separated non-empty domain labels
        let pattern = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Return `true` when `email` looks like `local@domain.tld`.
///
/// # Examples
/// ```
/// use taskboard::domain::validate_email;
///
/// assert!(validate_email("j@test.com"));
/// assert!(!validate_email("invalidemail"));
/// assert!(!validate_email("user@localhost"));
/// ```
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Return `true` when `raw` is a canonical hyphenated UUID.
///
/// Braced, URN and simple (unhyphenated) spellings are rejected so path
/// parameters have exactly one textual form.
///
/// # Examples
/// ```
/// use taskboard::domain::validate_identifier;
///
/// assert!(validate_identifier("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
/// assert!(!validate_identifier("invalid-id"));
/// ```
pub fn validate_identifier(raw: &str) -> bool {
    parse_identifier(raw).is_some()
}

pub(crate) fn parse_identifier(raw: &str) -> Option<Uuid> {
    let parsed = Uuid::try_parse(raw).ok()?;
    let canonical = parsed.hyphenated().to_string();
    canonical.eq_ignore_ascii_case(raw).then_some(parsed)
}
