//! Permission lifecycle manager for the sensor adapters.
//!
//! Issues at most one consent request per sensor kind per session. Concurrent
//! callers share the in-flight resolution instead of prompting again, and a
//! resolved outcome is cached for the rest of the session. Denied and
//! unsupported outcomes are logged, never raised: the pointer fallback makes
//! them non-fatal.

use std::sync::{Arc, Mutex};

use tokio::sync::{oneshot, watch};
use tracing::warn;

/// The two permission-gated sensor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Orientation,
    Motion,
}

impl SensorKind {
    const fn index(self) -> usize {
        match self {
            Self::Orientation => 0,
            Self::Motion => 1,
        }
    }
}

/// What the platform's consent prompt resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentDecision {
    Granted,
    Denied,
}

/// Session outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    /// The user consented.
    Granted,
    /// The user declined; final for the session.
    Denied,
    /// The platform exposes the event stream without a consent gate.
    NotRequired,
    /// The platform does not expose the event stream at all.
    Unsupported,
}

impl PermissionOutcome {
    /// Whether the adapter may attach its listener.
    #[must_use]
    pub fn allows_listening(self) -> bool {
        matches!(self, Self::Granted | Self::NotRequired)
    }
}

/// Platform consent capability, the external collaborator behind the broker.
pub trait ConsentApi: Send + Sync {
    /// Whether the platform exposes this sensor's event stream at all.
    fn supports(&self, kind: SensorKind) -> bool;

    /// Whether the event stream is gated behind an explicit consent prompt.
    fn requires_consent(&self, kind: SensorKind) -> bool;

    /// Begin one consent prompt. The receiver resolves when the user decides;
    /// a prompt that never resolves simply leaves the caller pending.
    fn request_consent(&self, kind: SensorKind) -> oneshot::Receiver<ConsentDecision>;
}

enum Slot {
    Idle,
    Pending(watch::Receiver<Option<PermissionOutcome>>),
    Done(PermissionOutcome),
}

enum Role {
    Drive(watch::Sender<Option<PermissionOutcome>>),
    Wait(watch::Receiver<Option<PermissionOutcome>>),
    Resolved(PermissionOutcome),
}

pub struct PermissionBroker {
    api: Arc<dyn ConsentApi>,
    slots: [Mutex<Slot>; 2],
}

impl PermissionBroker {
    #[must_use]
    pub fn new(api: Arc<dyn ConsentApi>) -> Self {
        Self {
            api,
            slots: [Mutex::new(Slot::Idle), Mutex::new(Slot::Idle)],
        }
    }

    /// Resolve the session's permission outcome for `kind`.
    ///
    /// The first caller on the consent path drives the platform prompt;
    /// later callers await the same resolution. No second prompt is ever
    /// issued for a kind within a session.
    pub async fn request(&self, kind: SensorKind) -> PermissionOutcome {
        if !self.api.supports(kind) {
            warn!(?kind, "sensor event stream not exposed by platform");
            return PermissionOutcome::Unsupported;
        }
        if !self.api.requires_consent(kind) {
            return PermissionOutcome::NotRequired;
        }

        let role = {
            let mut slot = self.slots[kind.index()]
                .lock()
                .expect("permission slot poisoned");
            match &*slot {
                Slot::Done(outcome) => Role::Resolved(*outcome),
                Slot::Pending(rx) => Role::Wait(rx.clone()),
                Slot::Idle => {
                    let (tx, rx) = watch::channel(None);
                    *slot = Slot::Pending(rx);
                    Role::Drive(tx)
                }
            }
        };

        match role {
            Role::Resolved(outcome) => outcome,
            Role::Drive(tx) => {
                let outcome = match self.api.request_consent(kind).await {
                    Ok(ConsentDecision::Granted) => PermissionOutcome::Granted,
                    Ok(ConsentDecision::Denied) => {
                        warn!(?kind, "sensor permission not granted");
                        PermissionOutcome::Denied
                    }
                    Err(_) => {
                        warn!(?kind, "consent prompt dropped without a decision");
                        PermissionOutcome::Denied
                    }
                };
                *self.slots[kind.index()]
                    .lock()
                    .expect("permission slot poisoned") = Slot::Done(outcome);
                let _ = tx.send(Some(outcome));
                outcome
            }
            Role::Wait(mut rx) => loop {
                if let Some(outcome) = *rx.borrow() {
                    break outcome;
                }
                if rx.changed().await.is_err() {
                    warn!(?kind, "consent driver dropped before resolving");
                    break PermissionOutcome::Denied;
                }
            },
        }
    }
}
