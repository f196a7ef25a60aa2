//! Form capture and the submission handler.
//!
//! A [`Form`] holds named text inputs. Submitting it through a
//! [`SubmissionHandler`] appends the values to the record store, resets the
//! form and raises a success confirmation that hides itself after a fixed
//! delay. Time is passed in by the caller.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::FormConfig;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::store::RecordStore;

/// Named text inputs awaiting submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    entries: Vec<(String, String)>,
}

impl Form {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an input's value, replacing an existing input of the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`Form::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an input from a `name=value` argument.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if there is no `=` or the name is empty.
    pub fn set_pair(&mut self, input: &str) -> Result<()> {
        let (name, value) = parse_field(input)?;
        self.set(name, value);
        Ok(())
    }

    /// Inputs in the order they were first set.
    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Check if no input has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear every input.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Extract the inputs into a record.
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record::from_entries(self.entries.iter().cloned())
    }
}

/// Split a `name=value` argument. The value may itself contain `=`.
///
/// # Errors
///
/// Returns [`Error::InvalidField`] if there is no `=` or the name is empty.
pub fn parse_field(input: &str) -> Result<(String, String)> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::InvalidField {
            input: input.to_string(),
        }),
    }
}

/// Style of a confirmation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationKind {
    /// The submission was stored.
    Success,
}

/// A transient message shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Text to show.
    pub message: String,
    /// How to style it.
    pub kind: ConfirmationKind,
    /// When it stops being visible.
    pub hide_at: Instant,
}

impl Confirmation {
    /// Check if the confirmation is still showing at `now`.
    #[must_use]
    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.hide_at
    }
}

/// Submission state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Nothing showing.
    #[default]
    Idle,
    /// A submission is being stored.
    Submitting,
    /// The last submission was stored and the confirmation is showing.
    Confirmed(Confirmation),
}

/// Stores submitted forms and tracks the confirmation.
#[derive(Debug)]
pub struct SubmissionHandler<'a> {
    store: &'a RecordStore,
    message: String,
    delay: Duration,
    state: SubmissionState,
}

impl<'a> SubmissionHandler<'a> {
    /// Create a handler writing to `store`.
    #[must_use]
    pub fn new(store: &'a RecordStore, config: &FormConfig) -> Self {
        Self {
            store,
            message: config.confirmation_message.clone(),
            delay: Duration::from_secs(config.confirmation_secs),
            state: SubmissionState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Submit `form`: append its record to the store, reset it, and show a
    /// confirmation until `now + delay`.
    ///
    /// Nothing is validated. Storage failures are logged by the store and
    /// don't change the flow.
    pub fn submit(&mut self, form: &mut Form, now: Instant) -> Confirmation {
        self.state = SubmissionState::Submitting;

        let record = form.to_record();
        debug!("Submitting record: {:?}", record);
        let total = self.store.append(record).len();
        info!("Form submitted; store now holds {} records", total);

        form.reset();

        let confirmation = Confirmation {
            message: self.message.clone(),
            kind: ConfirmationKind::Success,
            hide_at: now + self.delay,
        };
        self.state = SubmissionState::Confirmed(confirmation.clone());
        confirmation
    }

    /// Advance time: hide an expired confirmation.
    pub fn tick(&mut self, now: Instant) {
        if let SubmissionState::Confirmed(confirmation) = &self.state {
            if !confirmation.is_visible(now) {
                debug!("Hiding confirmation");
                self.state = SubmissionState::Idle;
            }
        }
    }

    /// The confirmation showing at `now`, if any.
    #[must_use]
    pub fn visible_confirmation(&self, now: Instant) -> Option<&Confirmation> {
        match &self.state {
            SubmissionState::Confirmed(c) if c.is_visible(now) => Some(c),
            _ => None,
        }
    }
}
