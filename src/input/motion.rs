//! Device-motion adapter: acceleration plus rotation rate.
//!
//! The only adapter that produces a rotation vector, which is why it carries
//! the highest fusion rank.

use std::sync::Arc;

use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::events::MotionEvent;
use crate::fusion::Fusion;
use crate::signal::{OffsetVector, RotationVector, SourceKind};

/// Normalize one motion sample. Both the acceleration and rotation-rate
/// structures, and all of their fields, must be present; otherwise the sample
/// is dropped whole, never partially applied.
#[must_use]
pub fn sample_from(event: &MotionEvent, gain: f32) -> Option<(OffsetVector, RotationVector)> {
    let accel = event.acceleration?;
    let rate = event.rotation_rate?;
    let gain = f64::from(gain);

    let offset = OffsetVector::new((accel.x? * gain) as f32, (accel.y? * gain) as f32);
    let rotation = RotationVector::new(
        (rate.alpha? * gain) as f32,
        (rate.beta? * gain) as f32,
        (rate.gamma? * gain) as f32,
    );
    (offset.is_finite()
        && rotation.alpha.is_finite()
        && rotation.beta.is_finite()
        && rotation.gamma.is_finite())
    .then_some((offset, rotation))
}

/// Consume the platform's motion event stream until cancelled or the stream
/// closes. The receiver is dropped on every exit path.
pub async fn run(mut events: Receiver<MotionEvent>, fusion: Arc<Fusion>, cancel: CancellationToken) {
    let gain = fusion.gain();
    loop {
        select! {
            _ = cancel.cancelled() => break,
            maybe = events.recv() => match maybe {
                Some(event) => match sample_from(&event, gain) {
                    Some((offset, rotation)) => {
                        fusion.publish(SourceKind::Motion, offset, rotation);
                    }
                    None => debug!(?event, "dropping motion sample with missing fields"),
                },
                None => break,
            },
        }
    }
}
