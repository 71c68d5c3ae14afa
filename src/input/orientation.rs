//! Device-orientation adapter: tilt events into offset vectors.

use std::sync::Arc;

use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::events::OrientationEvent;
use crate::fusion::Fusion;
use crate::signal::{OffsetVector, RotationVector, SourceKind};

/// Normalize one tilt sample: left-right tilt maps to x, negated front-back
/// tilt to y. Both components must be present or the sample is dropped whole.
#[must_use]
pub fn offset_from(event: &OrientationEvent, gain: f32) -> Option<OffsetVector> {
    let beta = event.beta?;
    let gamma = event.gamma?;
    let offset = OffsetVector::new((gamma * f64::from(gain)) as f32, (-beta * f64::from(gain)) as f32);
    offset.is_finite().then_some(offset)
}

/// Consume the platform's orientation event stream until cancelled or the
/// stream closes. The receiver is dropped on every exit path, so no sample
/// can be delivered after teardown.
pub async fn run(
    mut events: Receiver<OrientationEvent>,
    fusion: Arc<Fusion>,
    cancel: CancellationToken,
) {
    let gain = fusion.gain();
    loop {
        select! {
            _ = cancel.cancelled() => break,
            maybe = events.recv() => match maybe {
                Some(event) => match offset_from(&event, gain) {
                    Some(offset) => {
                        fusion.publish(SourceKind::Orientation, offset, RotationVector::ZERO);
                    }
                    None => debug!(?event, "dropping orientation sample with missing fields"),
                },
                None => break,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::DEFAULT_GAIN;

    #[test]
    fn maps_gamma_to_x_and_negated_beta_to_y() {
        let event = OrientationEvent::new(10.0, 20.0);
        let offset = offset_from(&event, DEFAULT_GAIN).unwrap();
        assert!((offset.x - 0.2).abs() < 1e-6);
        assert!((offset.y + 0.1).abs() < 1e-6);
    }

    #[test]
    fn drops_sample_missing_either_component() {
        let missing_beta = OrientationEvent {
            beta: None,
            gamma: Some(5.0),
        };
        let missing_gamma = OrientationEvent {
            beta: Some(5.0),
            gamma: None,
        };
        assert!(offset_from(&missing_beta, DEFAULT_GAIN).is_none());
        assert!(offset_from(&missing_gamma, DEFAULT_GAIN).is_none());
    }
}
