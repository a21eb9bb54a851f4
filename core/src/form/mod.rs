//! # Form Adapter
//!
//! A [`FormSchema`] registers fields with their rules and the normalization
//! steps applied to a valid draft. [`FormSchema::submit`] either returns the
//! assembled [`Payload`] or per-field [`FieldErrors`]; a partial payload is
//! never produced.
//!
//! ```rust,ignore
//! let schema = FormSchema::new()
//!     .field("password", rules::rules_for(FieldSemantics::NewPassword))
//!     .field("confirmPassword", rules::rules_for(FieldSemantics::ConfirmPassword))
//!     .strip("confirmPassword");
//! let payload = schema.submit(&draft)?;
//! ```

pub mod rules;

use fancy_regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A single validation rule.
#[derive(Clone)]
pub enum Rule {
    /// Value must be non-empty.
    Required { message: String },
    /// Value must contain a match of `regex`. Skipped for empty values.
    Pattern { regex: Arc<Regex>, message: String },
    /// Predicate over this field's value and a sibling field's value.
    Validate {
        sibling: String,
        predicate: fn(&str, &str) -> bool,
        message: String,
    },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required {
            message: message.into(),
        }
    }

    pub fn pattern(regex: Arc<Regex>, message: impl Into<String>) -> Self {
        Rule::Pattern {
            regex,
            message: message.into(),
        }
    }

    /// Value must equal the sibling field's value.
    pub fn matches(sibling: impl Into<String>, message: impl Into<String>) -> Self {
        Rule::Validate {
            sibling: sibling.into(),
            predicate: |value, other| value == other,
            message: message.into(),
        }
    }

    fn check(&self, value: &str, draft: &FormDraft) -> Option<&str> {
        match self {
            Rule::Required { message } => value.is_empty().then_some(message.as_str()),
            Rule::Pattern { regex, message } => {
                if value.is_empty() {
                    return None;
                }
                let matched = regex.is_match(value).unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "Pattern evaluation failed");
                    false
                });
                (!matched).then_some(message.as_str())
            }
            Rule::Validate {
                sibling,
                predicate,
                message,
            } => {
                let other = draft.get(sibling).unwrap_or_default();
                (!predicate(value, other)).then_some(message.as_str())
            }
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Required { message } => f.debug_tuple("Required").field(message).finish(),
            Rule::Pattern { regex, message } => f
                .debug_struct("Pattern")
                .field("regex", &regex.as_str())
                .field("message", message)
                .finish(),
            Rule::Validate {
                sibling, message, ..
            } => f
                .debug_struct("Validate")
                .field("sibling", sibling)
                .field("message", message)
                .finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Coerced to a JSON number on submit.
    Number,
    /// Coerced to a JSON integer; fractions and exponents are field errors.
    Integer,
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub rules: Vec<Rule>,
}

/// Discrete fields folded into one ordered array.
#[derive(Debug, Clone)]
struct Collapse {
    fields: Vec<String>,
    into: String,
}

/// Ephemeral field values of one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    values: BTreeMap<String, String>,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormDraft {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut draft = FormDraft::new();
        for (k, v) in iter {
            draft.set(k, v);
        }
        draft
    }
}

/// Validation failures, at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }
}

/// A validated, normalized submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Add a key the form does not own (e.g. the `_id` of the edited entity).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0))
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Field registrations plus normalization steps.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
    collapses: Vec<Collapse>,
    stripped: Vec<String>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(self, name: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.register(name, FieldKind::Text, rules)
    }

    pub fn number(self, name: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.register(name, FieldKind::Number, rules)
    }

    pub fn integer(self, name: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.register(name, FieldKind::Integer, rules)
    }

    fn register(mut self, name: impl Into<String>, kind: FieldKind, rules: Vec<Rule>) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            rules,
        });
        self
    }

    /// Replace the discrete `fields` with one ordered array under `into`.
    pub fn collapse<I, S>(mut self, fields: I, into: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collapses.push(Collapse {
            fields: fields.into_iter().map(Into::into).collect(),
            into: into.into(),
        });
        self
    }

    /// Drop a field that exists only for client-side cross-checks.
    pub fn strip(mut self, name: impl Into<String>) -> Self {
        self.stripped.push(name.into());
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Run every rule on every registered field.
    pub fn validate(&self, draft: &FormDraft) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        for spec in &self.fields {
            let value = draft.get(&spec.name).unwrap_or_default();
            if let Some(message) = spec.rules.iter().find_map(|rule| rule.check(value, draft)) {
                errors.insert(&spec.name, message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, then assemble the payload.
    pub fn submit(&self, draft: &FormDraft) -> Result<Payload, FieldErrors> {
        self.validate(draft)?;

        let mut errors = FieldErrors::default();
        let mut map = Map::new();
        for spec in &self.fields {
            let raw = draft.get(&spec.name).unwrap_or_default();
            let value = match spec.kind {
                FieldKind::Text => Value::String(raw.to_string()),
                FieldKind::Number => match coerce_number(raw) {
                    Some(number) => number,
                    None => {
                        errors.insert(&spec.name, "Must be a number");
                        continue;
                    }
                },
                FieldKind::Integer => match raw.trim().parse::<i64>() {
                    Ok(int) => Value::from(int),
                    Err(_) => {
                        errors.insert(&spec.name, "Must be a whole number");
                        continue;
                    }
                },
            };
            map.insert(spec.name.clone(), value);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        for collapse in &self.collapses {
            let items = collapse
                .fields
                .iter()
                .map(|name| map.remove(name).unwrap_or(Value::String(String::new())))
                .collect();
            map.insert(collapse.into.clone(), Value::Array(items));
        }
        for name in &self.stripped {
            map.remove(name);
        }
        Ok(Payload(map))
    }
}

fn coerce_number(raw: &str) -> Option<Value> {
    let raw = raw.trim();
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Value::from(int));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::from)
}
