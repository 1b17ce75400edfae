//! Login and registration input validation.
//!
//! All checks run locally so that bad input is reported per field before any
//! request reaches the account service.

use std::fmt;

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    /// Display name (registration only).
    Name,
    /// Email address.
    Email,
    /// Password.
    Password,
    /// Password confirmation (registration only).
    ConfirmPassword,
}

impl Field {
    /// Lower-case label used in messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm password",
        }
    }
}

/// Per-field validation failures, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// One message per failing field.
    errors: Vec<(Field, &'static str)>,
}

impl ValidationErrors {
    /// Whether every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| *m)
    }

    /// All failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().copied()
    }

    /// Record a failure when `msg` is set.
    fn push(&mut self, field: Field, msg: Option<&'static str>) {
        if let Some(m) = msg {
            self.errors.push((field, m));
        }
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    /// - Returns the collected failures when any field failed.
    pub fn into_result(mut self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            self.errors.sort_by_key(|(f, _)| *f);
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, msg) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(msg)?;
            first = false;
        }
        Ok(())
    }
}

/// Minimum password length accepted by both forms.
pub const MIN_PASSWORD_LEN: usize = 6;

/// What: Check an email address against `^\S+@\S+\.\S+$`.
///
/// Details:
/// - No whitespace anywhere; some `@` with at least one character before it and
///   some later `.` that is neither adjacent to that `@` nor the last character.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    email.char_indices().any(|(at, c)| {
        c == '@'
            && at > 0
            && email[at + 1..]
                .match_indices('.')
                .any(|(off, _)| off > 0 && at + 1 + off < email.len() - 1)
    })
}

/// Validate the email field.
#[must_use]
pub fn email_error(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        Some("Email is required")
    } else if !is_valid_email(email) {
        Some("Invalid email format")
    } else {
        None
    }
}

/// Validate the password field.
#[must_use]
pub fn password_error(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("Password is required")
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters")
    } else {
        None
    }
}

/// Validate the display name field.
#[must_use]
pub fn name_error(name: &str) -> Option<&'static str> {
    let t = name.trim();
    if t.is_empty() {
        Some("Name is required")
    } else if t.chars().count() < 2 {
        Some("Name must be at least 2 characters")
    } else {
        None
    }
}

/// Validate the confirmation field against the password.
#[must_use]
pub fn confirm_error(confirm: &str, password: &str) -> Option<&'static str> {
    if confirm.is_empty() {
        Some("Please confirm your password")
    } else if confirm != password {
        Some("Passwords do not match")
    } else {
        None
    }
}

/// What: Validate the login form.
///
/// # Errors
/// - Per-field messages for email and password.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();
    errs.push(Field::Email, email_error(email));
    errs.push(Field::Password, password_error(password));
    errs.into_result()
}

/// What: Validate the registration form.
///
/// # Errors
/// - Per-field messages for name, email, password and confirmation.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();
    errs.push(Field::Name, name_error(name));
    errs.push(Field::Email, email_error(email));
    errs.push(Field::Password, password_error(password));
    errs.push(Field::ConfirmPassword, confirm_error(confirm, password));
    errs.into_result()
}

/// Characters counted as "special" by the strength meter.
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Password strength breakdown shown next to the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PasswordStrength {
    /// Number of satisfied criteria (0-5).
    pub score: u8,
    /// At least six characters.
    pub has_min_length: bool,
    /// Contains `a-z`.
    pub has_lowercase: bool,
    /// Contains `A-Z`.
    pub has_uppercase: bool,
    /// Contains `0-9`.
    pub has_number: bool,
    /// Contains one of the special characters.
    pub has_special: bool,
}

/// Score a password against the five strength criteria.
#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    let has_min_length = password.chars().count() >= MIN_PASSWORD_LEN;
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_number = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARS.contains(c));
    let score = [
        has_min_length,
        has_lowercase,
        has_uppercase,
        has_number,
        has_special,
    ]
    .iter()
    .filter(|b| **b)
    .count();
    PasswordStrength {
        score: u8::try_from(score).unwrap_or(5),
        has_min_length,
        has_lowercase,
        has_uppercase,
        has_number,
        has_special,
    }
}
