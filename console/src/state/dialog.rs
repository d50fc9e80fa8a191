//! Create/edit dialog state.
//!
//! DESIGN
//! ======
//! `submit` runs the form's validator and hands back a copy of the form only
//! when it passes; callers send the network request with that copy and
//! report the outcome through `finish`. A failing form never reaches the
//! caller, so no request is made for it.

#[cfg(test)]
#[path = "dialog_test.rs"]
mod dialog_test;

use iam::validate::{FieldErrors, FormMode};

use crate::net::error::ApiError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DialogState<F> {
    pub open: bool,
    pub mode: FormMode,
    pub form: F,
    pub errors: FieldErrors,
    pub submitting: bool,
    /// Failure reported by the backend for the last submit.
    pub server_error: Option<String>,
}

impl<F: Clone + Default> DialogState<F> {
    pub fn open_create(&mut self) {
        self.open_with(FormMode::Create, F::default());
    }

    pub fn open_edit(&mut self, id: impl Into<String>, form: F) {
        self.open_with(FormMode::Edit(id.into()), form);
    }

    fn open_with(&mut self, mode: FormMode, form: F) {
        *self = Self {
            open: true,
            mode,
            form,
            ..Self::default()
        };
    }

    pub fn close(&mut self) {
        self.open = false;
        self.submitting = false;
        self.errors.clear();
        self.server_error = None;
    }

    /// Apply an edit to the form fields.
    pub fn edit(&mut self, change: impl FnOnce(&mut F)) {
        change(&mut self.form);
    }

    /// Validate and, when clean, mark the dialog as submitting and return the
    /// form to send. Returns `None` while a submit is already in flight.
    pub fn submit(&mut self, validate: impl FnOnce(&F, &FormMode) -> FieldErrors) -> Option<F> {
        if self.submitting {
            return None;
        }
        let errors = validate(&self.form, &self.mode);
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }
        self.errors.clear();
        self.server_error = None;
        self.submitting = true;
        Some(self.form.clone())
    }

    /// Record the backend outcome: success closes the dialog, failure keeps
    /// it open with the message shown.
    pub fn finish(&mut self, result: Result<(), ApiError>) {
        self.submitting = false;
        match result {
            Ok(()) => self.close(),
            Err(e) => self.server_error = Some(e.to_string()),
        }
    }

    #[must_use]
    pub fn error(&self, field: &str) -> Option<String> {
        self.errors.get(field).map(str::to_owned)
    }

    #[must_use]
    pub fn title(&self, noun: &str) -> String {
        if self.mode.is_create() { format!("Create {noun}") } else { format!("Edit {noun}") }
    }
}
