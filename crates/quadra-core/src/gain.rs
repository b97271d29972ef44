//! Gain staging helpers.
//!
//! A gain control is stored twice: the decibel value the host reads back and
//! the linear multiplier the audio path uses. [`Gain`] keeps the pair together
//! so that `pow(10, x)` runs once per write instead of once per sample, and so
//! the two halves can never drift apart.
//!
//! # Usage
//!
//! ```rust
//! use quadra_core::gain::{Gain, GAIN_MAX_DB};
//!
//! let mut input = Gain::from_db(0.0);
//! assert_eq!(input.linear(), 1.0);
//!
//! input.set_db(-6.0);
//! assert!((input.linear() - 0.501).abs() < 0.001);
//!
//! input.set_db(100.0);
//! assert_eq!(input.db(), GAIN_MAX_DB);
//! ```

use crate::{ParamDescriptor, db_to_linear, sanitize};

/// Minimum gain in dB.
pub const GAIN_MIN_DB: f32 = -40.0;

/// Maximum gain in dB.
pub const GAIN_MAX_DB: f32 = 10.0;

/// A gain stored as a `(dB, linear)` pair.
///
/// The linear field is a pure function of the dB field: every constructor and
/// setter recomputes it as `10^(0.05 · dB)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gain {
    db: f32,
    linear: f32,
}

impl Gain {
    /// Unity gain (0 dB).
    pub const UNITY: Self = Self {
        db: 0.0,
        linear: 1.0,
    };

    /// Create a gain from decibels, clamped to [`GAIN_MIN_DB`]..=[`GAIN_MAX_DB`].
    ///
    /// Non-finite input reads as 0 dB.
    pub fn from_db(db: f32) -> Self {
        let db = sanitize(db).clamp(GAIN_MIN_DB, GAIN_MAX_DB);
        Self {
            db,
            linear: db_to_linear(db),
        }
    }

    /// Rebuild a pair from raw parts without recomputing.
    ///
    /// Only for values that were produced by [`Gain::into_parts`].
    pub(crate) const fn from_parts(db: f32, linear: f32) -> Self {
        Self { db, linear }
    }

    /// Split into `(db, linear)`.
    pub const fn into_parts(self) -> (f32, f32) {
        (self.db, self.linear)
    }

    /// Set the gain in dB and recompute the linear multiplier.
    #[inline]
    pub fn set_db(&mut self, db: f32) {
        *self = Self::from_db(db);
    }

    /// Gain in dB.
    #[inline]
    pub fn db(&self) -> f32 {
        self.db
    }

    /// Linear multiplier.
    #[inline]
    pub fn linear(&self) -> f32 {
        self.linear
    }
}

impl Default for Gain {
    fn default() -> Self {
        Self::UNITY
    }
}

/// [`ParamDescriptor`] for a gain control in the standard range.
pub fn gain_param_descriptor(
    name: &'static str,
    short_name: &'static str,
    default: f32,
) -> ParamDescriptor {
    ParamDescriptor::gain_db(name, short_name, GAIN_MIN_DB, GAIN_MAX_DB, default)
}
