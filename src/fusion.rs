//! Fusion & fallback state machine.
//!
//! Exactly one source is authoritative at any time. The session starts in
//! Pointer-only; the first valid sample from a permitted sensor adapter
//! engages that adapter for the rest of the session. Precedence is fixed:
//! Motion preempts Orientation preempts Pointer, resolved by an atomic
//! rank `fetch_max` so simultaneous first samples can never race into
//! different winners across runs.

use std::sync::Arc;

use crate::input::pointer;
use crate::signal::{FrameSignal, OffsetVector, RotationVector, SignalCache, SourceKind};

#[derive(Debug)]
pub struct Fusion {
    cache: SignalCache,
    gain: f32,
}

impl Fusion {
    #[must_use]
    pub fn new(gain: f32) -> Arc<Self> {
        Arc::new(Self {
            cache: SignalCache::new(),
            gain,
        })
    }

    #[must_use]
    pub fn gain(&self) -> f32 {
        self.gain
    }

    #[must_use]
    pub fn active(&self) -> SourceKind {
        self.cache.active()
    }

    /// Called by adapters with a normalized valid sample. Engages the source
    /// on its first sample; the sample is only stored while the source is
    /// authoritative, so a preempted adapter's pushes are discarded.
    pub fn publish(&self, source: SourceKind, offset: OffsetVector, rotation: RotationVector) {
        let active = self.cache.engage(source);
        if active == source {
            self.cache.store(offset, rotation);
        }
    }

    /// Per-frame resolution. While Pointer-only, the offset is recomputed
    /// from the host's current pointer position (pull); once a sensor source
    /// is engaged the tick stops writing and returns whatever that adapter
    /// last pushed (push). Rotation reads as zero unless the motion adapter
    /// supplied one.
    pub fn tick(&self, pointer_position: [f32; 2]) -> FrameSignal {
        if self.cache.active() == SourceKind::Pointer {
            // A non-finite pointer sample is dropped whole; the previous
            // fused value holds.
            if let Some(offset) = pointer::offset_from(pointer_position, self.gain) {
                self.cache.store(offset, RotationVector::ZERO);
            }
        }
        self.cache.snapshot()
    }

    /// Read the current fused signal without supplying pointer input.
    #[must_use]
    pub fn snapshot(&self) -> FrameSignal {
        self.cache.snapshot()
    }
}
