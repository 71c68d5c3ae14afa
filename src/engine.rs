//! Wires the permission broker, input adapters, and fusion state machine
//! together for one viewing session.

use std::sync::Arc;

use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::events::{MotionEvent, OrientationEvent};
use crate::fusion::Fusion;
use crate::input;
use crate::permission::{ConsentApi, PermissionBroker, SensorKind};
use crate::signal::FrameSignal;

/// Handle to one running sensor adapter task.
///
/// `stop` is idempotent; after it returns no further sample can reach the
/// fusion cache from this adapter, because the run loop drops its event
/// receiver on exit.
#[derive(Debug)]
pub struct AdapterHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl AdapterHandle {
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Stop the adapter and wait for its listener to detach.
    pub async fn shutdown(self) {
        self.token.cancel();
        let _ = self.task.await;
    }
}

pub struct Engine {
    fusion: Arc<Fusion>,
    broker: PermissionBroker,
    cancel: CancellationToken,
}

impl Engine {
    #[must_use]
    pub fn new(api: Arc<dyn ConsentApi>, gain: f32) -> Self {
        Self {
            fusion: Fusion::new(gain),
            broker: PermissionBroker::new(api),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn fusion(&self) -> Arc<Fusion> {
        Arc::clone(&self.fusion)
    }

    /// Request orientation permission and, if listening is allowed, spawn the
    /// adapter over the given event stream. Returns `None` when the adapter
    /// is excluded for the session (denied or unsupported); the pointer
    /// fallback is unaffected.
    pub async fn attach_orientation(
        &self,
        events: Receiver<OrientationEvent>,
    ) -> Option<AdapterHandle> {
        let outcome = self.broker.request(SensorKind::Orientation).await;
        if !outcome.allows_listening() {
            return None;
        }
        info!(?outcome, "orientation adapter listening");
        let token = self.cancel.child_token();
        let task = tokio::spawn(input::orientation::run(
            events,
            self.fusion(),
            token.clone(),
        ));
        Some(AdapterHandle { token, task })
    }

    /// Same contract as [`Engine::attach_orientation`], for the motion stream.
    pub async fn attach_motion(&self, events: Receiver<MotionEvent>) -> Option<AdapterHandle> {
        let outcome = self.broker.request(SensorKind::Motion).await;
        if !outcome.allows_listening() {
            return None;
        }
        info!(?outcome, "motion adapter listening");
        let token = self.cancel.child_token();
        let task = tokio::spawn(input::motion::run(events, self.fusion(), token.clone()));
        Some(AdapterHandle { token, task })
    }

    /// Per-frame entry point for the render host.
    #[must_use]
    pub fn tick(&self, pointer_position: [f32; 2]) -> FrameSignal {
        self.fusion.tick(pointer_position)
    }

    /// Tear down every adapter. Idempotent; child tokens cancel with it.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
