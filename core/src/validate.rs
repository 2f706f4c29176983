//! Draft validation.
//!
//! Validation is a pure function of the draft: it returns a [`FieldErrors`]
//! map with one human-readable message per failing field. An empty map means
//! the draft can be submitted.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::draft::{ProductDraft, UserDraft};
use crate::form::FormMode;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Field name → message for every field that failed its rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"\S+@\S+\.\S+")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Parse price text into a finite value strictly greater than zero.
pub fn parse_price(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price > 0.0)
}

/// Split comma-separated tag text, trimming each tag and dropping empties.
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`split_tags`] for already-clean tags.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn validate_product(draft: &ProductDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if is_blank(&draft.name) {
        errors.insert("name", "Name is required");
    }
    if is_blank(&draft.description) {
        errors.insert("description", "Description is required");
    }
    if parse_price(&draft.price).is_none() {
        errors.insert("price", "Price must be a positive number");
    }
    if is_blank(&draft.category) {
        errors.insert("category", "Category is required");
    }
    errors
}

/// In edit mode a blank password means "keep the current one" and is not
/// checked.
pub fn validate_user(draft: &UserDraft, mode: &FormMode) -> FieldErrors {
    user_errors(draft, mode.is_edit())
}

pub(crate) fn user_errors(draft: &UserDraft, password_optional: bool) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if is_blank(&draft.name) {
        errors.insert("name", "Name is required");
    }

    if is_blank(&draft.email) {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(&draft.email) {
        errors.insert("email", "Email is invalid");
    }

    let keep_password = password_optional && is_blank(&draft.password);
    if !keep_password {
        if is_blank(&draft.password) {
            errors.insert("password", "Password is required");
        } else if draft.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
    }
    errors
}
