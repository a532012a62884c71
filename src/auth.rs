//! Local-only sign in / sign up.
//!
//! There is no account backend: a successful form produces a [`User`] record
//! that is kept in the local preferences. Passwords are checked for shape and
//! then discarded.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::newsletter::is_valid_email;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome Back",
            AuthMode::Signup => "Join the Community",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Sign In",
            AuthMode::Signup => "Create Account",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl User {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters.")]
    PasswordTooShort,
    #[error("Please tell us your name.")]
    MissingName,
    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// Validate the form for `mode` and build the local user record.
pub fn authenticate(mode: AuthMode, form: &AuthForm) -> Result<User, AuthError> {
    let email = form.email.trim();
    if !is_valid_email(email) {
        return Err(AuthError::InvalidEmail);
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }

    let name = match mode {
        AuthMode::Signup => {
            let name = form.name.trim();
            if name.is_empty() {
                return Err(AuthError::MissingName);
            }
            if form.password != form.confirm_password {
                return Err(AuthError::PasswordMismatch);
            }
            name.to_string()
        }
        AuthMode::Login => match form.name.trim() {
            "" => display_name_from_email(email),
            name => name.to_string(),
        },
    };

    Ok(User {
        id: Uuid::new_v4().to_string(),
        name,
        email: email.to_string(),
        avatar: Some(gravatar_url(email)),
    })
}

/// `jane.doe@example.com` becomes `Jane Doe`.
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let words: Vec<String> = local
        .split(['.', '_', '-', '+'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        local.to_string()
    } else {
        words.join(" ")
    }
}

pub fn gravatar_url(email: &str) -> String {
    let digest = md5::compute(email.trim().to_lowercase().as_bytes());
    format!("https://www.gravatar.com/avatar/{digest:x}?s=64&d=identicon")
}
