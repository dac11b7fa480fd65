//! Store calls for the edit modal.
//!
//! Lookups and upserts run on a worker thread so the frame loop never blocks
//! on the network. Each reply is tagged with the session that asked for it;
//! a reply for a session that has since been closed or replaced is dropped.

use crate::DashboardApp;
use callboard_core::{
    EditError, EditOutcome, EditSession, EditStep, LookupRequest, SaveRequest, SaveSync, SessionId,
};
use prefstore::{PreferenceStore, RemoteError, StoredValue};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

#[derive(Debug)]
pub(crate) enum RemoteReply {
    Lookup {
        session: SessionId,
        result: Result<Option<StoredValue>, RemoteError>,
    },
    Save {
        session: SessionId,
        result: Result<(), RemoteError>,
    },
}

pub(crate) fn spawn_lookup(
    store: Arc<dyn PreferenceStore>,
    request: LookupRequest,
) -> Receiver<RemoteReply> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let result = store.lookup(&request.email, &request.setting_key);
        let _ = tx.send(RemoteReply::Lookup {
            session: request.session,
            result,
        });
    });
    rx
}

pub(crate) fn spawn_save(
    store: Arc<dyn PreferenceStore>,
    request: SaveRequest,
) -> Receiver<RemoteReply> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let result = store.upsert(&request.record);
        let _ = tx.send(RemoteReply::Save {
            session: request.session,
            result,
        });
    });
    rx
}

impl DashboardApp {
    /// Opens the modal for the live slot, discarding any earlier session.
    pub(crate) fn open_edit(&mut self) {
        self.close_edit();
        let slot = self.surface.slot();
        self.edit.session = Some(EditSession::open(slot.value, self.surface.slot_label()));
    }

    /// Closes the modal. An in-flight call keeps running; its reply is ignored.
    pub(crate) fn close_edit(&mut self) {
        if let Some(mut session) = self.edit.session.take() {
            session.cancel();
            log::debug!("edit session {} closed", session.id());
        }
        self.edit.reply_rx = None;
    }

    pub(crate) fn submit_identity(&mut self) {
        let Some(session) = self.edit.session.as_mut() else {
            return;
        };
        match session.begin_lookup() {
            Ok(request) => {
                self.edit.reply_rx = Some(spawn_lookup(Arc::clone(&self.store), request));
            }
            Err(EditError::Validation(_)) => {}
            Err(err) => log::debug!("ignoring identity submit: {err}"),
        }
    }

    pub(crate) fn confirm_overwrite(&mut self) {
        if let Some(session) = self.edit.session.as_mut() {
            if let Err(err) = session.confirm_overwrite() {
                log::debug!("ignoring overwrite confirmation: {err}");
            }
        }
    }

    pub(crate) fn submit_value(&mut self) {
        let Some(session) = self.edit.session.as_mut() else {
            return;
        };
        match session.begin_save() {
            Ok(request) => {
                self.edit.reply_rx = Some(spawn_save(Arc::clone(&self.store), request));
            }
            Err(EditError::Validation(_)) => {}
            Err(err) => log::debug!("ignoring value submit: {err}"),
        }
    }

    /// Picks up a finished store call, if any, and advances the session.
    pub(crate) fn poll_remote(&mut self) {
        let reply = match &self.edit.reply_rx {
            Some(rx) => match rx.try_recv() {
                Ok(reply) => Some(reply),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => self.lost_reply(),
            },
            None => None,
        };
        if let Some(reply) = reply {
            self.edit.reply_rx = None;
            self.handle_reply(reply);
        }
    }

    /// Stand-in reply for a worker that went away without answering.
    fn lost_reply(&self) -> Option<RemoteReply> {
        let session = self.edit.session.as_ref()?;
        let result = Err(RemoteError::Transport(
            "store worker stopped without replying".to_string(),
        ));
        Some(if session.step() == EditStep::CollectValue {
            RemoteReply::Save {
                session: session.id(),
                result,
            }
        } else {
            RemoteReply::Lookup {
                session: session.id(),
                result: result.map(|()| None),
            }
        })
    }

    fn handle_reply(&mut self, reply: RemoteReply) {
        let reply_session = match &reply {
            RemoteReply::Lookup { session, .. } | RemoteReply::Save { session, .. } => *session,
        };
        let Some(session) = self.edit.session.as_mut() else {
            log::debug!("dropping store reply for closed session {reply_session}");
            return;
        };
        if session.id() != reply_session {
            log::debug!("dropping stale store reply for session {reply_session}");
            return;
        }

        match reply {
            RemoteReply::Lookup { result, .. } => {
                if let Err(err) = session.resolve_lookup(result) {
                    log::warn!("lookup reply rejected: {err}");
                }
            }
            RemoteReply::Save { result, .. } => match session.complete_save(result) {
                Ok(outcome) => {
                    self.edit.session = None;
                    self.apply_outcome(outcome);
                }
                Err(err) => log::warn!("save reply rejected: {err}"),
            },
        }
    }

    fn apply_outcome(&mut self, outcome: EditOutcome) {
        let EditOutcome::Saved { email, value, sync } = outcome else {
            return;
        };
        if let Err(err) = self.surface.report_edit(&email, value) {
            self.show_warning("Update failed", &err.to_string());
            return;
        }
        let label = self.surface.slot_label();
        match sync {
            SaveSync::Everywhere => {
                self.show_info("Saved", &format!("{label} set to {value} for {email}"));
            }
            SaveSync::LocalOnly { reason } => {
                self.show_warning(
                    "Saved locally only",
                    &format!(
                        "{label} set to {value}; the preference store did not accept it ({reason})"
                    ),
                );
            }
        }
    }
}
