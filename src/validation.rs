//! Form validation for the login and signup pages
//!
//! Each form is checked field by field; the first failing rule of a field
//! is the message shown under that input.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{LoginCredentials, SignupCredentials};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Form fields that can carry an inline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(Field, String)>,
}

impl FieldErrors {
    /// Record an error unless the field already has one.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if !is_valid_email(email) {
        errors.add(Field::Email, "Invalid email address");
    }
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            Field::Password,
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
}

impl LoginCredentials {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        errors.into_result()
    }
}

impl SignupCredentials {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        if self.confirm_password != self.password {
            errors.add(Field::ConfirmPassword, "Passwords don't match");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn login(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last+tag@sub.example.co", true)]
    #[case("", false)]
    #[case("plainaddress", false)]
    #[case("user@", false)]
    #[case("@example.com", false)]
    #[case("user@example", false)]
    #[case("user @example.com", false)]
    fn test_email_syntax(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(is_valid_email(email), valid, "{email}");
    }

    #[test]
    fn test_valid_login_passes() {
        assert!(login("user@example.com", "secret").validate().is_ok());
    }

    #[test]
    fn test_login_reports_each_field() {
        let errors = login("nope", "123").validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Email), Some("Invalid email address"));
        assert_eq!(
            errors.get(Field::Password),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.get(Field::ConfirmPassword), None);
    }

    #[test]
    fn test_password_length_counts_chars() {
        // six multi-byte characters
        assert!(login("user@example.com", "ééééé").validate().is_err());
        assert!(login("user@example.com", "éééééé").validate().is_ok());
    }

    #[test]
    fn test_signup_requires_matching_confirmation() {
        let creds = SignupCredentials {
            email: "user@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
        };
        let errors = creds.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::ConfirmPassword), Some("Passwords don't match"));

        let creds = SignupCredentials {
            confirm_password: "secret1".to_string(),
            ..creds
        };
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = FieldErrors::default();
        errors.add(Field::Email, "first");
        errors.add(Field::Email, "second");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Email), Some("first"));
    }
}
