// Operation controller: runs each alias operation from the pending input
// through request building, dispatch and interpretation, then folds the
// result into the session state.
//
// Every operation kind carries its own generation counter. A response is
// only applied when it belongs to the newest request of its kind, so a
// slow reply cannot overwrite the outcome of a later one.

use crate::api::Dispatch;
use crate::error::{OperationError, PreconditionError};
use crate::host::Host;
use crate::request::{AliasRequest, OperationKind};
use crate::response::{interpret, Outcome, Success};
use crate::state::{
    AliasRecord, ErrorChannel, Field, OperationMode, SessionState, Snapshot, Tone,
};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Identifies one started request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: OperationKind,
    pub generation: u64,
}

/// A request that passed its preconditions and is waiting for an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub ticket: Ticket,
    pub request: AliasRequest,
}

/// What an operation did to the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Local input was missing or invalid. Nothing was sent.
    Rejected(PreconditionError),
    Succeeded(Success),
    Failed(OperationError),
    /// A newer request of the same kind was started; the outcome was dropped.
    Stale,
}

pub struct Controller<D, H> {
    dispatcher: D,
    host: H,
    state: SessionState,
    generations: [u64; 4],
    copy_delay: Duration,
}

impl<D: Dispatch, H: Host> Controller<D, H> {
    pub fn new(dispatcher: D, host: H, copy_delay: Duration) -> Self {
        Controller {
            dispatcher,
            host,
            state: SessionState::default(),
            generations: [0; 4],
            copy_delay,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn mode(&self) -> OperationMode {
        self.state.mode
    }

    pub fn snapshot(&self, now: Instant) -> Snapshot {
        self.state.snapshot(now)
    }

    pub fn set_input(&mut self, field: Field, value: impl Into<String>) {
        *self.state.input.slot(field) = value.into();
    }

    /// Activate `next`. Every tab field is cleared and the shared channel is
    /// hidden. The create form, its channel and the success block stay.
    pub fn switch_mode(&mut self, next: OperationMode) {
        debug!(from = ?self.state.mode, to = ?next, "switching tab");
        self.state.mode = next;
        self.state.input.clear_tabs();
        self.state.shared_channel.dismiss();
    }

    pub fn create(&mut self) -> Applied {
        self.run(OperationKind::Create)
    }

    pub fn resolve(&mut self) -> Applied {
        self.run(OperationKind::Resolve)
    }

    pub fn rename(&mut self) -> Applied {
        self.run(OperationKind::Rename)
    }

    pub fn delete(&mut self) -> Applied {
        self.run(OperationKind::Delete)
    }

    /// Start, dispatch and apply one operation.
    pub fn run(&mut self, kind: OperationKind) -> Applied {
        let pending = match self.begin(kind) {
            Ok(pending) => pending,
            Err(e) => return Applied::Rejected(e),
        };
        let outcome = self.dispatcher.dispatch(&pending.request);
        self.finish(pending, outcome)
    }

    /// Check preconditions and build the request for `kind` from the
    /// pending input. On failure the matching channel shows the reason.
    pub fn begin(&mut self, kind: OperationKind) -> Result<Pending, PreconditionError> {
        let input = &self.state.input;
        let built = match kind {
            OperationKind::Create => AliasRequest::create(&input.url, &input.create_alias),
            OperationKind::Resolve => AliasRequest::resolve(&input.redirect_alias),
            OperationKind::Rename => AliasRequest::rename(&input.edit_current, &input.edit_new),
            OperationKind::Delete => AliasRequest::delete(&input.delete_alias),
        };
        // A rejected attempt still supersedes any request of the same kind
        // that is in flight.
        let generation = &mut self.generations[kind.index()];
        *generation += 1;
        let generation = *generation;

        let request = match built {
            Ok(request) => request,
            Err(e) => {
                debug!(?kind, reason = %e, "precondition failed");
                self.channel(kind).set(e.to_string(), Tone::Error);
                return Err(e);
            }
        };
        Ok(Pending {
            ticket: Ticket { kind, generation },
            request,
        })
    }

    /// Apply the outcome of a request started with [`Controller::begin`].
    pub fn finish(&mut self, pending: Pending, outcome: Outcome) -> Applied {
        let Pending { ticket, request } = pending;
        let newest = self.generations[ticket.kind.index()];
        if ticket.generation != newest {
            debug!(kind = ?ticket.kind, generation = ticket.generation, newest, "dropping stale response");
            return Applied::Stale;
        }

        match interpret(&request, outcome) {
            Ok(success) => {
                self.on_success(&request, &success);
                Applied::Succeeded(success)
            }
            Err(e) => {
                warn!(kind = ?ticket.kind, error = %e, "operation failed");
                self.channel(ticket.kind).set(e.to_string(), Tone::Error);
                Applied::Failed(e)
            }
        }
    }

    fn on_success(&mut self, request: &AliasRequest, success: &Success) {
        let state = &mut self.state;
        match success {
            Success::Created { alias } => {
                let long_url = match request {
                    AliasRequest::Create { url, .. } => url.clone(),
                    _ => String::new(),
                };
                info!(%long_url, %alias, "link shortened");
                state.record = Some(AliasRecord {
                    long_url,
                    alias: (!alias.is_empty()).then(|| alias.clone()),
                });
                state.show_success = true;
                state.create_channel.dismiss();
                state.input.create_alias.clear();
            }
            Success::Resolved { target } => {
                info!(%target, "alias resolved");
                state.shared_channel.dismiss();
                self.host.open_target(target);
            }
            Success::Renamed { current, new } => {
                info!(%current, %new, "alias renamed");
                state.input.edit_current.clear();
                state.input.edit_new.clear();
                state.shared_channel.set(
                    format!("Alias changed from \"{current}\" to \"{new}\" successfully!"),
                    Tone::Notice,
                );
            }
            Success::Deleted { alias } => {
                info!(%alias, "alias deleted");
                state.input.delete_alias.clear();
                state
                    .shared_channel
                    .set(format!("Alias \"{alias}\" deleted successfully!"), Tone::Notice);
            }
        }
    }

    /// Copy the shortened link to the clipboard. Returns whether the
    /// "copied" notification was raised. Failures only get logged.
    pub fn copy(&mut self, now: Instant) -> bool {
        let text = match (&self.state.record, self.state.show_success) {
            (Some(record), true) => record.display().to_string(),
            _ => return false,
        };
        match self.host.write_clipboard(&text) {
            Ok(()) => {
                self.state.copy.arm(now, self.copy_delay);
                true
            }
            Err(e) => {
                warn!(error = %e, "copy failed");
                false
            }
        }
    }

    fn channel(&mut self, kind: OperationKind) -> &mut ErrorChannel {
        match kind {
            OperationKind::Create => &mut self.state.create_channel,
            OperationKind::Resolve | OperationKind::Rename | OperationKind::Delete => {
                &mut self.state.shared_channel
            }
        }
    }
}
