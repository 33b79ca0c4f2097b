use std::collections::HashSet;

use crate::config::PasswordConfig;
use crate::domain::error::DomainError;

/// Attributes shorter than this are ignored by the similarity check.
const MIN_SIMILARITY_ATTR_LEN: usize = 3;

/// Profile attributes a password is compared against.
#[derive(Debug, Clone, Copy)]
pub struct PasswordSubject<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// Password strength rules applied at sign-up.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
    reject_numeric: bool,
    check_similarity: bool,
    common: HashSet<String>,
}

impl PasswordPolicy {
    #[must_use]
    pub fn from_config(cfg: &PasswordConfig) -> Self {
        Self {
            min_length: cfg.min_length,
            reject_numeric: cfg.reject_numeric,
            check_similarity: cfg.check_similarity,
            common: cfg
                .common_passwords
                .iter()
                .map(|p| p.trim().to_lowercase())
                .collect(),
        }
    }

    /// Returns the first rule the password breaks, as a `password` field error.
    pub fn check(&self, password: &str, subject: &PasswordSubject<'_>) -> Result<(), DomainError> {
        if password.chars().count() < self.min_length {
            return Err(DomainError::field(
                "password",
                format!(
                    "This password is too short. It must contain at least {} characters.",
                    self.min_length
                ),
            ));
        }

        if self.check_similarity
            && let Some(attr) = similar_attribute(password, subject)
        {
            return Err(DomainError::field(
                "password",
                format!("The password is too similar to the {attr}."),
            ));
        }

        if self.common.contains(&password.trim().to_lowercase()) {
            return Err(DomainError::field("password", "This password is too common."));
        }

        if self.reject_numeric && password.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::field(
                "password",
                "This password is entirely numeric.",
            ));
        }

        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::from_config(&PasswordConfig::default())
    }
}

fn similar_attribute(password: &str, subject: &PasswordSubject<'_>) -> Option<&'static str> {
    let password = password.to_lowercase();
    let local_part = subject.email.split('@').next().unwrap_or_default();

    [
        ("username", subject.username),
        ("email address", local_part),
        ("first name", subject.first_name),
        ("last name", subject.last_name),
    ]
    .into_iter()
    .find_map(|(name, value)| {
        let value = value.trim().to_lowercase();
        if value.chars().count() < MIN_SIMILARITY_ATTR_LEN {
            return None;
        }
        (password.contains(&value) || value.contains(&password)).then_some(name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> PasswordSubject<'static> {
        PasswordSubject {
            username: "jdoe",
            email: "john.doe@example.com",
            first_name: "John",
            last_name: "Doe",
        }
    }

    fn message(res: Result<(), DomainError>) -> String {
        match res {
            Err(DomainError::Validation { field, message }) => {
                assert_eq!(field.as_deref(), Some("password"));
                message
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_reasonable_password() {
        PasswordPolicy::default()
            .check("violet-Harbor-42", &subject())
            .unwrap();
    }

    #[test]
    fn rejects_short_password() {
        let msg = message(PasswordPolicy::default().check("a1b2", &subject()));
        assert_eq!(
            msg,
            "This password is too short. It must contain at least 8 characters."
        );
    }

    #[test]
    fn rejects_numeric_password() {
        let msg = message(PasswordPolicy::default().check("90817263", &subject()));
        assert_eq!(msg, "This password is entirely numeric.");
    }

    #[test]
    fn rejects_common_password_case_insensitively() {
        let msg = message(PasswordPolicy::default().check("PassWord123", &subject()));
        assert_eq!(msg, "This password is too common.");
    }

    #[test]
    fn rejects_password_containing_username() {
        let msg = message(PasswordPolicy::default().check("xx-JDOE-xx", &subject()));
        assert_eq!(msg, "The password is too similar to the username.");
    }

    #[test]
    fn rejects_password_containing_email_local_part() {
        let msg = message(PasswordPolicy::default().check("john.doe!!", &subject()));
        assert_eq!(msg, "The password is too similar to the email address.");
    }

    #[test]
    fn short_attributes_are_ignored() {
        let s = PasswordSubject {
            username: "al",
            email: "al@example.com",
            first_name: "",
            last_name: "",
        };
        PasswordPolicy::default().check("metal-albatross", &s).unwrap();
    }

    #[test]
    fn rules_can_be_disabled() {
        let cfg = PasswordConfig {
            min_length: 4,
            reject_numeric: false,
            check_similarity: false,
            common_passwords: vec![],
        };
        let policy = PasswordPolicy::from_config(&cfg);
        policy.check("1234", &subject()).unwrap();
        policy.check("jdoe1", &subject()).unwrap();
    }
}
