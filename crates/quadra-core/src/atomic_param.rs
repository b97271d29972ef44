//! Lock-free parameter cells shared between a control thread and the audio thread.
//!
//! The control thread (host automation, CLI, GUI) writes; the audio thread
//! reads once per block. No locks, no allocations. A reader may see a value
//! one block late, which is harmless for audio parameters.
//!
//! - [`AtomicParam`] - a single clamped `f32` stored as bits in an `AtomicU32`
//! - [`AtomicGain`] - a [`Gain`] `(dB, linear)` pair packed into one `AtomicU64`,
//!   so both halves are published by a single store and never observed torn

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::gain::Gain;
use crate::math::sanitize;

/// A thread-safe atomic parameter using bit-cast f32.
///
/// Writer thread sets, audio thread reads. Values are clamped to `[min, max]`
/// on write.
#[derive(Debug)]
pub struct AtomicParam {
    value: AtomicU32,
    min: f32,
    max: f32,
}

impl AtomicParam {
    /// Create a new atomic parameter with default and range.
    pub fn new(default: f32, min: f32, max: f32) -> Self {
        Self {
            value: AtomicU32::new(default.clamp(min, max).to_bits()),
            min,
            max,
        }
    }

    /// Set the parameter value (writer thread). NaN and infinities store 0 before clamping.
    #[inline]
    pub fn set(&self, v: f32) {
        let clamped = sanitize(v).clamp(self.min, self.max);
        self.value.store(clamped.to_bits(), Ordering::Release);
    }

    /// Get the parameter value (audio thread).
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.value.load(Ordering::Acquire))
    }
}

/// A [`Gain`] shared across threads.
///
/// The dB value occupies the high 32 bits and the linear multiplier the low
/// 32 bits of a single `AtomicU64`.
#[derive(Debug)]
pub struct AtomicGain {
    packed: AtomicU64,
}

impl AtomicGain {
    /// Create a shared gain initialised to `default_db`.
    pub fn new(default_db: f32) -> Self {
        Self {
            packed: AtomicU64::new(pack(Gain::from_db(default_db))),
        }
    }

    /// Set the gain in dB; the linear multiplier is computed here, on the writer side.
    #[inline]
    pub fn set_db(&self, db: f32) {
        self.store(Gain::from_db(db));
    }

    /// Publish a complete pair.
    #[inline]
    pub fn store(&self, gain: Gain) {
        self.packed.store(pack(gain), Ordering::Release);
    }

    /// Load the current pair.
    #[inline]
    pub fn load(&self) -> Gain {
        unpack(self.packed.load(Ordering::Acquire))
    }
}

#[inline]
fn pack(gain: Gain) -> u64 {
    let (db, linear) = gain.into_parts();
    (u64::from(db.to_bits()) << 32) | u64::from(linear.to_bits())
}

#[inline]
fn unpack(bits: u64) -> Gain {
    let db = f32::from_bits((bits >> 32) as u32);
    let linear = f32::from_bits(bits as u32);
    Gain::from_parts(db, linear)
}
