//! Form draft, schema and last validation errors of one page.

use happyshop_core::binder::Effect;
use happyshop_core::form::{FieldErrors, FormDraft, FormSchema, Payload};
use serde_json::Value;

use crate::error::SubmitError;

#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    draft: FormDraft,
    errors: FieldErrors,
}

impl FormState {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            draft: FormDraft::new(),
            errors: FieldErrors::default(),
        }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Field-scoped messages from the last submit attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Validate the draft. On failure the errors are kept for display.
    pub fn payload(&mut self) -> Result<Payload, SubmitError> {
        match self.schema.submit(&self.draft) {
            Ok(payload) => {
                self.errors = FieldErrors::default();
                Ok(payload)
            }
            Err(errors) => {
                tracing::debug!(invalid = errors.len(), "Submit blocked by validation");
                self.errors = errors.clone();
                Err(SubmitError::Invalid(errors))
            }
        }
    }

    /// Validate and decode into the action's input type.
    pub fn decode<T: serde::de::DeserializeOwned>(
        &mut self,
        extra: &[(&str, Value)],
    ) -> Result<T, SubmitError> {
        let mut payload = self.payload()?;
        for (key, value) in extra {
            payload.insert(*key, value.clone());
        }
        payload
            .decode()
            .map_err(|source| SubmitError::Malformed { source })
    }

    pub fn reset(&mut self) {
        self.draft.clear();
        self.errors = FieldErrors::default();
    }

    /// Apply the effects that belong to the form.
    pub fn apply(&mut self, effects: &[Effect]) {
        if effects.contains(&Effect::ResetForm) {
            self.reset();
        }
    }
}
