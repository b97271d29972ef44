//! Parameter introspection system for discoverable effect parameters.
//!
//! This module provides the [`ParameterInfo`] trait and supporting types that
//! describe an effect's controls to whatever sits in front of it:
//!
//! - **Plugin hosts**: parameter metadata, stable IDs, automation flags
//! - **Command-line tools**: listing parameters and resolving them by name
//! - **Tests**: sweeping every parameter to its extremes
//!
//! # Design
//!
//! The system uses index-based parameter access for efficiency and simplicity.
//! Each parameter is described by a [`ParamDescriptor`] carrying display names,
//! unit, range, default, step, a stable [`ParamId`], a string symbol and
//! [`ParamFlags`].
//!
//! # Example
//!
//! ```rust
//! use quadra_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct SimpleGain {
//!     gain_db: f32,
//! }
//!
//! impl ParameterInfo for SimpleGain {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Gain", "Gain", -60.0, 12.0, 0.0)
//!                 .with_id(ParamId(100), "Gain")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain_db,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain_db = value.clamp(-60.0, 12.0);
//!         }
//!     }
//! }
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Used by plugin hosts for automation recording and parameter mapping. Once
/// assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for plugin host communication.
///
/// # Example
///
/// ```rust
/// use quadra_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!flags.contains(ParamFlags::BYPASS));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (enum-like, integer values).
    pub const STEPPED: Self = Self(1 << 1);
    /// Parameter is the host-designated bypass switch.
    pub const BYPASS: Self = Self(1 << 2);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for effects that expose introspectable parameters.
///
/// # Parameter Indexing
///
/// Parameters are accessed by zero-based index. The index must be stable for
/// the lifetime of the effect instance. Use [`param_count`](Self::param_count)
/// to determine valid indices.
pub trait ParameterInfo {
    /// Returns the number of parameters this effect exposes.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at the given index.
    ///
    /// Returns `None` if `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at the given index.
    ///
    /// Returns `0.0` if `index >= param_count()`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at the given index.
    ///
    /// Implementations clamp the value to the descriptor range. Out-of-bounds
    /// indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches against [`ParamDescriptor::name`], [`ParamDescriptor::short_name`]
    /// and [`ParamDescriptor::string_id`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Returns the stable [`ParamId`] for the parameter at the given index.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable [`ParamId`].
    ///
    /// Scans all parameters (O(n)); setup paths only.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Input Gain").
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Default value when the effect is created.
    pub default: f32,

    /// Recommended step increment for encoder-based control.
    pub step: f32,

    /// Stable numeric ID for host automation.
    pub id: ParamId,

    /// Stable symbol (e.g. `"InputGain"`), used for lookup and serialization.
    pub string_id: &'static str,

    /// Capability flags for plugin host communication.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Gain parameter with custom name and range (decibels).
    pub fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.5,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Dimensionless amount in \[0, 1\] (e.g. a drive control).
    pub fn amount(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// On/off switch; values above 0.5 read as on.
    pub fn toggle(name: &'static str, short_name: &'static str) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default: 0.0,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Integer-valued choice between `min` and `max`.
    pub fn stepped(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quadra_core::{ParamDescriptor, ParamId};
    ///
    /// let desc = ParamDescriptor::amount("Low Drive", "Low", 0.6).with_id(ParamId(5), "LowDrive");
    /// assert_eq!(desc.id, ParamId(5));
    /// assert_eq!(desc.string_id, "LowDrive");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quadra_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Gain", "Gain", -40.0, 10.0, 0.0);
    /// assert_eq!(desc.clamp(0.0), 0.0);
    /// assert_eq!(desc.clamp(-100.0), -40.0);
    /// assert_eq!(desc.clamp(100.0), 10.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (value - self.min) / range
    }

    /// Converts a normalized value (0.0 to 1.0) to the actual parameter range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized * (self.max - self.min)
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - for gain parameters.
    Decibels,

    /// Integer multiple (e.g. an oversampling factor).
    Factor,

    /// No unit - for dimensionless parameters.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quadra_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::Factor.suffix(), "x");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Factor => "x",
            ParamUnit::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestEffect {
        gain: f32,
        drive: f32,
    }

    impl ParameterInfo for TestEffect {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(
                    ParamDescriptor::gain_db("Gain", "Gain", -40.0, 10.0, 0.0)
                        .with_id(ParamId(100), "TestGain"),
                ),
                1 => Some(ParamDescriptor::amount("Drive", "Drv", 0.5).with_id(ParamId(101), "TestDrive")),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            match index {
                0 => self.gain,
                1 => self.drive,
                _ => 0.0,
            }
        }

        fn set_param(&mut self, index: usize, value: f32) {
            let Some(desc) = self.param_info(index) else {
                return;
            };
            match index {
                0 => self.gain = desc.clamp(value),
                1 => self.drive = desc.clamp(value),
                _ => {}
            }
        }
    }

    fn effect() -> TestEffect {
        TestEffect {
            gain: 0.0,
            drive: 0.5,
        }
    }

    #[test]
    fn test_find_by_name() {
        let fx = effect();
        assert_eq!(fx.find_param_by_name("gain"), Some(0));
        assert_eq!(fx.find_param_by_name("DRV"), Some(1));
        assert_eq!(fx.find_param_by_name("testdrive"), Some(1));
        assert_eq!(fx.find_param_by_name("nope"), None);
    }

    #[test]
    fn test_find_by_id() {
        let fx = effect();
        assert_eq!(fx.param_index_by_id(ParamId(101)), Some(1));
        assert_eq!(fx.param_index_by_id(ParamId(7)), None);
        assert_eq!(fx.param_id(0), Some(ParamId(100)));
        assert_eq!(fx.param_id(5), None);
    }

    #[test]
    fn test_set_clamps_and_ignores_bad_index() {
        let mut fx = effect();
        fx.set_param(0, -100.0);
        assert_eq!(fx.get_param(0), -40.0);
        fx.set_param(9, 1.0);
        assert_eq!(fx.get_param(9), 0.0);
    }

    #[test]
    fn test_normalize_roundtrip() {
        let desc = ParamDescriptor::gain_db("Gain", "Gain", -40.0, 10.0, 0.0);
        assert_eq!(desc.normalize(-40.0), 0.0);
        assert_eq!(desc.normalize(10.0), 1.0);
        assert!((desc.denormalize(desc.normalize(-3.0)) - (-3.0)).abs() < 1e-5);
    }

    #[test]
    fn test_toggle_and_stepped_flags() {
        let toggle = ParamDescriptor::toggle("Bypass", "Bypass");
        assert!(toggle.flags.contains(ParamFlags::STEPPED));
        assert!(!toggle.flags.contains(ParamFlags::BYPASS));

        let bypass = toggle.with_flags(toggle.flags.union(ParamFlags::BYPASS));
        assert!(bypass.flags.contains(ParamFlags::BYPASS));

        let stepped = ParamDescriptor::stepped("Ratio", "Ratio", ParamUnit::Factor, 1.0, 8.0, 1.0);
        assert_eq!(stepped.step, 1.0);
        assert_eq!(ParamFlags::default(), ParamFlags::AUTOMATABLE);
        assert!(!ParamFlags::NONE.contains(ParamFlags::AUTOMATABLE));
    }
}
