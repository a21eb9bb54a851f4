//! Shared rule table keyed by field semantics.
//!
//! Every form that has an email or password field takes its rules from
//! here, so each pattern literal exists once.

use fancy_regex::Regex;
use std::sync::{Arc, LazyLock};

use super::Rule;

/// Unanchored: a value containing an address anywhere passes.
static EMAIL: LazyLock<Arc<Regex>> = LazyLock::new(|| {
    Arc::new(
        Regex::new(
            r#"[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?"#,
        )
        .expect("email pattern compiles"),
    )
});

static PASSWORD_COMPLEXITY: LazyLock<Arc<Regex>> = LazyLock::new(|| {
    Arc::new(
        Regex::new(r"^(?=.*\d)(?=.*[a-z])(?=.*[A-Z]).{8,}$")
            .expect("password pattern compiles"),
    )
});

pub const PASSWORD_COMPLEXITY_MESSAGE: &str =
    "At least 8 characters, including an uppercase, a lowercase, and a number.";

/// What a field means, independent of the form it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSemantics {
    Email,
    Username,
    /// Password typed to sign in: presence only.
    LoginPassword,
    /// Password being chosen: presence and complexity.
    NewPassword,
    /// Must repeat the sibling `password` field.
    ConfirmPassword,
}

pub fn rules_for(semantics: FieldSemantics) -> Vec<Rule> {
    match semantics {
        FieldSemantics::Email => vec![
            Rule::required("Email is required"),
            Rule::pattern(EMAIL.clone(), "Enter a valid email"),
        ],
        FieldSemantics::Username => vec![Rule::required("Username is required")],
        FieldSemantics::LoginPassword => vec![Rule::required("Password is required")],
        FieldSemantics::NewPassword => vec![
            Rule::required("Password is required"),
            Rule::pattern(PASSWORD_COMPLEXITY.clone(), PASSWORD_COMPLEXITY_MESSAGE),
        ],
        FieldSemantics::ConfirmPassword => vec![
            Rule::required("Confirm Password is required"),
            Rule::matches("password", "Passwords don't match"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(EMAIL.is_match("ada@shop.test").unwrap());
        assert!(EMAIL.is_match("first.last+tag@mail.example.org").unwrap());
        assert!(!EMAIL.is_match("ada@").unwrap());
        assert!(!EMAIL.is_match("shop.test").unwrap());
    }

    #[test]
    fn test_password_complexity() {
        assert!(PASSWORD_COMPLEXITY.is_match("Abcdefg1").unwrap());
        assert!(!PASSWORD_COMPLEXITY.is_match("short").unwrap());
        assert!(!PASSWORD_COMPLEXITY.is_match("abcdefg1").unwrap());
        assert!(!PASSWORD_COMPLEXITY.is_match("ABCDEFG1").unwrap());
        assert!(!PASSWORD_COMPLEXITY.is_match("Abcdefgh").unwrap());
    }
}
