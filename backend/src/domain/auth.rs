//! Signup and login input validation.
//!
//! Inbound adapters describe each submitted field as a [`FieldValue`] so the
//! domain can apply the signup and login rules in their documented order
//! without knowing the wire format.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserName};

/// Conflict message when the email already belongs to an account.
pub const EMAIL_ALREADY_REGISTERED: &str = "This email is already registered";

/// Minimum password length in UTF-16 code units.
pub const MIN_PASSWORD_CHARS: usize = 4;

/// Shape of one submitted form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Missing, null, `false` or numeric zero.
    Absent,
    /// Present with a non-string JSON type.
    NonText,
    /// Present as a string, possibly empty.
    Text(String),
}

impl FieldValue {
    fn is_blank(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::NonText => false,
            Self::Text(text) => text.is_empty(),
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Reasons a signup form is rejected, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    MissingFields,
    NonStringValues,
    PasswordTooShort,
    InvalidEmail,
}

impl fmt::Display for SignupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => f.write_str("Please fill all the fields"),
            Self::NonStringValues => f.write_str("Please send string values only"),
            Self::PasswordTooShort => write!(
                f,
                "Password length must be atleast {MIN_PASSWORD_CHARS} characters"
            ),
            Self::InvalidEmail => f.write_str("Invalid Email"),
        }
    }
}

impl std::error::Error for SignupValidationError {}

/// Validated signup request.
///
/// # Examples
/// ```
/// use taskboard::domain::{FieldValue, SignupForm, SignupValidationError};
///
/// let text = |s: &str| FieldValue::Text(s.to_owned());
/// let form = SignupForm::try_from_fields(text("John"), text("j@test.com"), text("1234"));
/// assert!(form.is_ok());
///
/// let short = SignupForm::try_from_fields(text("John"), text("j@test.com"), text("123"));
/// assert_eq!(short.err(), Some(SignupValidationError::PasswordTooShort));
/// ```
#[derive(Debug, Clone)]
pub struct SignupForm {
    name: UserName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignupForm {
    /// Apply the signup checks; the first failing rule wins.
    pub fn try_from_fields(
        name: FieldValue,
        email: FieldValue,
        password: FieldValue,
    ) -> Result<Self, SignupValidationError> {
        let fields = [&name, &email, &password];
        if fields.iter().any(|field| field.is_blank()) {
            return Err(SignupValidationError::MissingFields);
        }
        let (Some(name), Some(email), Some(password)) =
            (name.into_text(), email.into_text(), password.into_text())
        else {
            return Err(SignupValidationError::NonStringValues);
        };
        let password = Zeroizing::new(password);
        if password.encode_utf16().count() < MIN_PASSWORD_CHARS {
            return Err(SignupValidationError::PasswordTooShort);
        }
        let email = EmailAddress::new(email).map_err(|_| SignupValidationError::InvalidEmail)?;
        let name = UserName::new(name).map_err(|_| SignupValidationError::MissingFields)?;
        Ok(Self {
            name,
            email,
            password,
        })
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Login payload was incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    MissingDetails,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDetails => f.write_str("Please enter all details!!"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Email and password submitted at login.
///
/// The email is not shape-checked; an unknown address is reported by the
/// lookup instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_fields(
        email: FieldValue,
        password: FieldValue,
    ) -> Result<Self, LoginValidationError> {
        match (email.into_text(), password.into_text()) {
            (Some(email), Some(password)) => Ok(Self {
                email,
                password: Zeroizing::new(password),
            }),
            _ => Err(LoginValidationError::MissingDetails),
        }
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
