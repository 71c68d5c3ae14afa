//! Fused input signal types and the lock-free last-value cache shared between
//! the render tick (reader) and the sensor adapters (writers).

use std::sync::atomic::{AtomicU8, AtomicU32, AtomicU64, Ordering};

/// Default gain applied to raw device units before publication.
pub const DEFAULT_GAIN: f32 = 0.01;

/// 2D viewpoint displacement in gain-scaled units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetVector {
    pub x: f32,
    pub y: f32,
}

impl OffsetVector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Angular rates (alpha, beta, gamma) in gain-scaled units. Only the motion
/// adapter produces a non-zero one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationVector {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl RotationVector {
    pub const ZERO: Self = Self {
        alpha: 0.0,
        beta: 0.0,
        gamma: 0.0,
    };

    #[must_use]
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self { alpha, beta, gamma }
    }
}

/// The three input sources, ordered by fusion precedence: a higher rank
/// preempts a lower one and never yields it back within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceKind {
    Pointer,
    Orientation,
    Motion,
}

impl SourceKind {
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Pointer => 0,
            Self::Orientation => 1,
            Self::Motion => 2,
        }
    }

    const fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Self::Pointer,
            1 => Self::Orientation,
            _ => Self::Motion,
        }
    }
}

/// What the render tick consumes each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSignal {
    pub offset: OffsetVector,
    pub rotation: RotationVector,
    pub source: SourceKind,
}

/// Last-value cache read without locking by the render tick and written
/// without locking by adapter callbacks.
///
/// The offset pair is packed into one `u64` so a reader can never observe a
/// torn (x, y) mix of two writes; rotation components are replaced whole-field
/// as individual `u32` bit patterns. The active rank only moves upward, via
/// `fetch_max`, which makes engagement order-independent.
#[derive(Debug)]
pub struct SignalCache {
    offset_bits: AtomicU64,
    rotation_bits: [AtomicU32; 3],
    active_rank: AtomicU8,
}

impl Default for SignalCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset_bits: AtomicU64::new(pack_offset(OffsetVector::ZERO)),
            rotation_bits: [
                AtomicU32::new(0f32.to_bits()),
                AtomicU32::new(0f32.to_bits()),
                AtomicU32::new(0f32.to_bits()),
            ],
            active_rank: AtomicU8::new(SourceKind::Pointer.rank()),
        }
    }

    /// Raise the active rank to at least `kind`'s and return whichever source
    /// is authoritative afterwards.
    pub fn engage(&self, kind: SourceKind) -> SourceKind {
        let prev = self.active_rank.fetch_max(kind.rank(), Ordering::AcqRel);
        SourceKind::from_rank(prev.max(kind.rank()))
    }

    #[must_use]
    pub fn active(&self) -> SourceKind {
        SourceKind::from_rank(self.active_rank.load(Ordering::Acquire))
    }

    pub fn store(&self, offset: OffsetVector, rotation: RotationVector) {
        self.offset_bits
            .store(pack_offset(offset), Ordering::Release);
        self.rotation_bits[0].store(rotation.alpha.to_bits(), Ordering::Release);
        self.rotation_bits[1].store(rotation.beta.to_bits(), Ordering::Release);
        self.rotation_bits[2].store(rotation.gamma.to_bits(), Ordering::Release);
    }

    #[must_use]
    pub fn snapshot(&self) -> FrameSignal {
        let [x, y]: [f32; 2] = bytemuck::cast(self.offset_bits.load(Ordering::Acquire));
        FrameSignal {
            offset: OffsetVector::new(x, y),
            rotation: RotationVector::new(
                f32::from_bits(self.rotation_bits[0].load(Ordering::Acquire)),
                f32::from_bits(self.rotation_bits[1].load(Ordering::Acquire)),
                f32::from_bits(self.rotation_bits[2].load(Ordering::Acquire)),
            ),
            source: self.active(),
        }
    }
}

fn pack_offset(offset: OffsetVector) -> u64 {
    bytemuck::cast([offset.x, offset.y])
}
