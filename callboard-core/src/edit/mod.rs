//! The "Overwrite Data" workflow.
//!
//! A session walks CollectIdentity → (ConfirmOverwrite) → CollectValue. It
//! never talks to the store itself: each remote step is split into a
//! `begin_*` call that hands out a request and a `resolve_*`/`complete_*`
//! call that takes the result. [`EditWorkflow`] glues both halves together
//! for callers that can block; the GUI runs the request on a worker thread
//! and feeds the result back on a later frame.
//!
//! Remote failures never stop the workflow. A failed lookup behaves like a
//! miss, a failed upsert still completes with [`SaveSync::LocalOnly`].

use crate::validation::{ValidationError, Validator};
use prefstore::{PreferenceRecord, RemoteError, StoredValue};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

mod workflow;

pub use workflow::EditWorkflow;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStep {
    CollectIdentity,
    ConfirmOverwrite,
    CollectValue,
}

impl fmt::Display for EditStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditStep::CollectIdentity => "collect identity",
            EditStep::ConfirmOverwrite => "confirm overwrite",
            EditStep::CollectValue => "collect value",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("action needs step '{expected}' but the session is at '{actual}'")]
    UnexpectedStep { expected: EditStep, actual: EditStep },
    #[error("a store request is still in flight")]
    Busy,
    #[error("no store request is in flight")]
    NotPending,
    #[error("session is closed")]
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveSync {
    /// The store accepted the upsert.
    Everywhere,
    /// Only the dashboard was updated.
    LocalOnly { reason: String },
}

impl SaveSync {
    pub fn is_local_only(&self) -> bool {
        matches!(self, SaveSync::LocalOnly { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Saved {
        email: String,
        value: f64,
        sync: SaveSync,
    },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    pub session: SessionId,
    pub email: String,
    pub setting_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub session: SessionId,
    pub record: PreferenceRecord,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Lookup,
    Save(f64),
}

#[derive(Debug, Clone)]
pub struct EditSession {
    id: SessionId,
    setting_key: String,
    seed_value: f64,
    step: EditStep,
    /// Text bound to the email field.
    pub email: String,
    /// Text bound to the value field.
    pub candidate_value: String,
    /// Email accepted by the last lookup; saves are keyed on this, not on
    /// the live field.
    checked_email: String,
    previous_remote_value: Option<f64>,
    error_message: Option<String>,
    pending: Option<Pending>,
    closed: bool,
}

impl EditSession {
    /// Starts a fresh session for a slot currently showing `current_value`.
    pub fn open(current_value: f64, setting_key: impl Into<String>) -> Self {
        Self {
            id: SessionId::next(),
            setting_key: setting_key.into(),
            seed_value: current_value,
            step: EditStep::CollectIdentity,
            email: String::new(),
            candidate_value: current_value.to_string(),
            checked_email: String::new(),
            previous_remote_value: None,
            error_message: None,
            pending: None,
            closed: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn step(&self) -> EditStep {
        self.step
    }

    pub fn setting_key(&self) -> &str {
        &self.setting_key
    }

    pub fn seed_value(&self) -> f64 {
        self.seed_value
    }

    pub fn previous_remote_value(&self) -> Option<f64> {
        self.previous_remote_value
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The email that passed validation, once a lookup has started.
    pub fn checked_email(&self) -> Option<&str> {
        (!self.checked_email.is_empty()).then_some(self.checked_email.as_str())
    }

    fn ensure_step(&self, expected: EditStep) -> Result<(), EditError> {
        if self.closed {
            return Err(EditError::Closed);
        }
        if self.pending.is_some() {
            return Err(EditError::Busy);
        }
        if self.step != expected {
            return Err(EditError::UnexpectedStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }

    fn reject(&mut self, err: ValidationError) -> EditError {
        self.error_message = Some(err.to_string());
        EditError::Validation(err)
    }

    /// Validates the email and hands out the lookup to perform.
    pub fn begin_lookup(&mut self) -> Result<LookupRequest, EditError> {
        self.ensure_step(EditStep::CollectIdentity)?;
        if let Err(err) = Validator::email(&self.email) {
            return Err(self.reject(err));
        }
        self.error_message = None;
        self.pending = Some(Pending::Lookup);
        self.checked_email = self.email.clone();
        Ok(LookupRequest {
            session: self.id,
            email: self.checked_email.clone(),
            setting_key: self.setting_key.clone(),
        })
    }

    /// Moves to ConfirmOverwrite on a hit, otherwise to CollectValue seeded
    /// with the open-time value. Errors are logged and treated as a miss.
    pub fn resolve_lookup(
        &mut self,
        result: Result<Option<StoredValue>, RemoteError>,
    ) -> Result<EditStep, EditError> {
        if self.closed {
            return Err(EditError::Closed);
        }
        if self.pending != Some(Pending::Lookup) {
            return Err(EditError::NotPending);
        }
        self.pending = None;
        match result {
            Ok(Some(found)) => {
                self.previous_remote_value = Some(found.custom_value);
                self.candidate_value = found.custom_value.to_string();
                self.step = EditStep::ConfirmOverwrite;
            }
            Ok(None) => {
                self.candidate_value = self.seed_value.to_string();
                self.step = EditStep::CollectValue;
            }
            Err(err) => {
                log::warn!(
                    "preference lookup for '{}' failed, continuing locally: {err}",
                    self.setting_key
                );
                self.candidate_value = self.seed_value.to_string();
                self.step = EditStep::CollectValue;
            }
        }
        Ok(self.step)
    }

    /// "Yes, Overwrite": continue with the stored value as the starting point.
    pub fn confirm_overwrite(&mut self) -> Result<(), EditError> {
        self.ensure_step(EditStep::ConfirmOverwrite)?;
        if let Some(previous) = self.previous_remote_value {
            self.candidate_value = previous.to_string();
        }
        self.step = EditStep::CollectValue;
        Ok(())
    }

    /// Closes the session without touching the dashboard. Allowed at any step,
    /// including while a request is in flight; its result is then dropped.
    pub fn cancel(&mut self) -> EditOutcome {
        self.closed = true;
        self.pending = None;
        EditOutcome::Cancelled
    }

    /// Parses the candidate value and hands out the upsert to perform. A
    /// rejected value never produces a request.
    pub fn begin_save(&mut self) -> Result<SaveRequest, EditError> {
        self.ensure_step(EditStep::CollectValue)?;
        let value = match Validator::numeric(&self.candidate_value) {
            Ok(value) => value,
            Err(err) => return Err(self.reject(err)),
        };
        self.error_message = None;
        self.pending = Some(Pending::Save(value));
        Ok(SaveRequest {
            session: self.id,
            record: PreferenceRecord::new(
                self.checked_email.clone(),
                self.setting_key.clone(),
                value,
            ),
        })
    }

    /// Finishes the session whatever the store said.
    pub fn complete_save(
        &mut self,
        result: Result<(), RemoteError>,
    ) -> Result<EditOutcome, EditError> {
        if self.closed {
            return Err(EditError::Closed);
        }
        let value = match self.pending {
            Some(Pending::Save(value)) => value,
            _ => return Err(EditError::NotPending),
        };
        self.pending = None;
        self.closed = true;
        let sync = match result {
            Ok(()) => SaveSync::Everywhere,
            Err(err) => {
                log::warn!(
                    "saving preference '{}' failed, keeping the value locally: {err}",
                    self.setting_key
                );
                SaveSync::LocalOnly {
                    reason: err.to_string(),
                }
            }
        };
        Ok(EditOutcome::Saved {
            email: self.checked_email.clone(),
            value,
            sync,
        })
    }
}
