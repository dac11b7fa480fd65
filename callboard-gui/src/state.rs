use crate::export::ExportFormat;
use crate::remote::RemoteReply;
use callboard_core::EditSession;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

/// The open "Customize Data" modal, if any, and the reply channel of its
/// in-flight store call.
#[derive(Default)]
pub(crate) struct EditModalState {
    pub(crate) session: Option<EditSession>,
    pub(crate) reply_rx: Option<Receiver<RemoteReply>>,
}

impl EditModalState {
    pub(crate) fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub(crate) fn is_waiting(&self) -> bool {
        self.reply_rx.is_some()
    }
}

#[derive(Default)]
pub(crate) struct ExportState {
    pub(crate) format: ExportFormat,
    pub(crate) dialog_rx: Option<Receiver<Option<PathBuf>>>,
}

impl ExportState {
    pub(crate) fn is_waiting(&self) -> bool {
        self.dialog_rx.is_some()
    }
}
