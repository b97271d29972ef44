//! Parameter surface of the quadrafuzz effect.
//!
//! [`QuadrafuzzParams`] is the shared store: the control thread writes, the
//! audio thread takes one [`ParamSnapshot`] at the top of every block. All
//! cells are atomics, so neither side ever blocks.
//!
//! | index | symbol | range | default |
//! |---|---|---|---|
//! | 0 | `Bypass` | off/on | off |
//! | 1 | `InputGain` | -40..10 dB | 0 |
//! | 2 | `OutputGain` | -40..10 dB | 0 |
//! | 3 | `DryGain` | -40..10 dB | -40 |
//! | 4 | `WetGain` | -40..10 dB | 0 |
//! | 5 | `LowDrive` | 0..1 | 0.6 |
//! | 6 | `MidLowDrive` | 0..1 | 0.8 |
//! | 7 | `MidHighDrive` | 0..1 | 0.5 |
//! | 8 | `HighDrive` | 0..1 | 0.6 |
//! | 9 | `Oversampling` | 1, 2, 4, 8 | 1 |

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use quadra_core::{
    AtomicGain, AtomicParam, BandRole, Gain, OversamplingRatio, ParamDescriptor, ParamFlags,
    ParamId, ParamUnit, gain_param_descriptor, sanitize,
};

/// Number of parameters.
pub const PARAM_COUNT: usize = 10;

/// Default drive per band, in [`BandRole`] order.
pub const DEFAULT_DRIVE: [f32; 4] = [0.6, 0.8, 0.5, 0.6];

/// Default dry gain: the dry path starts muted.
pub const DEFAULT_DRY_DB: f32 = -40.0;

/// Stable parameter index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParamIndex {
    /// Bypass switch.
    Bypass = 0,
    /// Gain applied to the input before the dry and wet paths.
    InputGain,
    /// Gain applied to the wet path after recombination.
    OutputGain,
    /// Level of the unprocessed signal.
    DryGain,
    /// Level of the signal entering the band split.
    WetGain,
    /// Drive of the low band.
    LowDrive,
    /// Drive of the lower mid band.
    MidLowDrive,
    /// Drive of the upper mid band.
    MidHighDrive,
    /// Drive of the high band.
    HighDrive,
    /// Oversampling factor.
    Oversampling,
}

impl ParamIndex {
    /// All parameters in index order.
    pub const ALL: [ParamIndex; PARAM_COUNT] = [
        ParamIndex::Bypass,
        ParamIndex::InputGain,
        ParamIndex::OutputGain,
        ParamIndex::DryGain,
        ParamIndex::WetGain,
        ParamIndex::LowDrive,
        ParamIndex::MidLowDrive,
        ParamIndex::MidHighDrive,
        ParamIndex::HighDrive,
        ParamIndex::Oversampling,
    ];

    /// Look up by position; `None` past the end.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position in the parameter list.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Drive parameter of a band.
    pub const fn drive_of(role: BandRole) -> Self {
        match role {
            BandRole::Low => ParamIndex::LowDrive,
            BandRole::MidLow => ParamIndex::MidLowDrive,
            BandRole::MidHigh => ParamIndex::MidHighDrive,
            BandRole::High => ParamIndex::HighDrive,
        }
    }

    /// Full metadata for this parameter.
    pub fn descriptor(self) -> ParamDescriptor {
        let id = ParamId(self as u32);
        match self {
            ParamIndex::Bypass => ParamDescriptor::toggle("Bypass", "Bypass")
                .with_id(id, "Bypass")
                .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::BYPASS)),
            ParamIndex::InputGain => {
                gain_param_descriptor("Input Gain", "Input", 0.0).with_id(id, "InputGain")
            }
            ParamIndex::OutputGain => {
                gain_param_descriptor("Output Gain", "Output", 0.0).with_id(id, "OutputGain")
            }
            ParamIndex::DryGain => {
                gain_param_descriptor("Dry Gain", "Dry", DEFAULT_DRY_DB).with_id(id, "DryGain")
            }
            ParamIndex::WetGain => {
                gain_param_descriptor("Wet Gain", "Wet", 0.0).with_id(id, "WetGain")
            }
            ParamIndex::LowDrive => {
                ParamDescriptor::amount("Low Drive", "Low", DEFAULT_DRIVE[0]).with_id(id, "LowDrive")
            }
            ParamIndex::MidLowDrive => {
                ParamDescriptor::amount("Mid-Low Drive", "MidLow", DEFAULT_DRIVE[1])
                    .with_id(id, "MidLowDrive")
            }
            ParamIndex::MidHighDrive => {
                ParamDescriptor::amount("Mid-High Drive", "MidHigh", DEFAULT_DRIVE[2])
                    .with_id(id, "MidHighDrive")
            }
            ParamIndex::HighDrive => {
                ParamDescriptor::amount("High Drive", "High", DEFAULT_DRIVE[3])
                    .with_id(id, "HighDrive")
            }
            ParamIndex::Oversampling => ParamDescriptor::stepped(
                "Oversampling",
                "OS",
                ParamUnit::Factor,
                1.0,
                8.0,
                1.0,
            )
            .with_id(id, "Oversampling"),
        }
    }
}

/// Everything one block of processing needs, read once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Copy input to output untouched.
    pub bypass: bool,
    /// Pre-gain shared by the dry and wet paths.
    pub input_gain: Gain,
    /// Post-gain on the recombined wet signal.
    pub output_gain: Gain,
    /// Dry path level.
    pub dry_gain: Gain,
    /// Wet path level.
    pub wet_gain: Gain,
    /// Drive per band, in [`BandRole`] order.
    pub drive: [f32; 4],
    /// Oversampling factor.
    pub oversampling: OversamplingRatio,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            bypass: false,
            input_gain: Gain::UNITY,
            output_gain: Gain::UNITY,
            dry_gain: Gain::from_db(DEFAULT_DRY_DB),
            wet_gain: Gain::UNITY,
            drive: DEFAULT_DRIVE,
            oversampling: OversamplingRatio::X1,
        }
    }
}

/// Lock-free parameter store shared between control and audio threads.
///
/// # Example
///
/// ```rust
/// use quadra_core::OversamplingRatio;
/// use quadra_effects::{ParamIndex, QuadrafuzzParams};
///
/// let params = QuadrafuzzParams::new();
/// params.set(ParamIndex::DryGain, -6.0);
/// params.set(ParamIndex::Oversampling, 3.7);
///
/// let snap = params.snapshot();
/// assert_eq!(snap.dry_gain.db(), -6.0);
/// assert_eq!(snap.oversampling, OversamplingRatio::X4);
/// ```
#[derive(Debug)]
pub struct QuadrafuzzParams {
    bypass: AtomicBool,
    input_gain: AtomicGain,
    output_gain: AtomicGain,
    dry_gain: AtomicGain,
    wet_gain: AtomicGain,
    drive: [AtomicParam; 4],
    /// Factor as an integer (1, 2, 4, 8).
    oversampling: AtomicU8,
}

impl QuadrafuzzParams {
    /// Create a store holding the defaults.
    pub fn new() -> Self {
        Self {
            bypass: AtomicBool::new(false),
            input_gain: AtomicGain::new(0.0),
            output_gain: AtomicGain::new(0.0),
            dry_gain: AtomicGain::new(DEFAULT_DRY_DB),
            wet_gain: AtomicGain::new(0.0),
            drive: DEFAULT_DRIVE.map(|d| AtomicParam::new(d, 0.0, 1.0)),
            oversampling: AtomicU8::new(1),
        }
    }

    /// Read every parameter once.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            bypass: self.bypass(),
            input_gain: self.input_gain.load(),
            output_gain: self.output_gain.load(),
            dry_gain: self.dry_gain.load(),
            wet_gain: self.wet_gain.load(),
            drive: [
                self.drive[0].get(),
                self.drive[1].get(),
                self.drive[2].get(),
                self.drive[3].get(),
            ],
            oversampling: self.oversampling(),
        }
    }

    /// Publish every field of `snapshot`.
    pub fn store(&self, snapshot: &ParamSnapshot) {
        self.set_bypass(snapshot.bypass);
        self.input_gain.store(snapshot.input_gain);
        self.output_gain.store(snapshot.output_gain);
        self.dry_gain.store(snapshot.dry_gain);
        self.wet_gain.store(snapshot.wet_gain);
        for role in BandRole::ALL {
            self.set_drive(role, snapshot.drive[role.index()]);
        }
        self.set_oversampling(snapshot.oversampling);
    }

    /// Set a parameter from a plain host value.
    ///
    /// Non-finite values read as 0; everything is clamped to the descriptor range.
    pub fn set(&self, index: ParamIndex, value: f32) {
        let value = sanitize(value);
        match index {
            ParamIndex::Bypass => self.set_bypass(value > 0.5),
            ParamIndex::InputGain => self.input_gain.set_db(value),
            ParamIndex::OutputGain => self.output_gain.set_db(value),
            ParamIndex::DryGain => self.dry_gain.set_db(value),
            ParamIndex::WetGain => self.wet_gain.set_db(value),
            ParamIndex::LowDrive => self.drive[0].set(value),
            ParamIndex::MidLowDrive => self.drive[1].set(value),
            ParamIndex::MidHighDrive => self.drive[2].set(value),
            ParamIndex::HighDrive => self.drive[3].set(value),
            ParamIndex::Oversampling => self.set_oversampling(OversamplingRatio::nearest(value)),
        }
    }

    /// Current plain value of a parameter.
    pub fn get(&self, index: ParamIndex) -> f32 {
        match index {
            ParamIndex::Bypass => {
                if self.bypass() {
                    1.0
                } else {
                    0.0
                }
            }
            ParamIndex::InputGain => self.input_gain.load().db(),
            ParamIndex::OutputGain => self.output_gain.load().db(),
            ParamIndex::DryGain => self.dry_gain.load().db(),
            ParamIndex::WetGain => self.wet_gain.load().db(),
            ParamIndex::LowDrive => self.drive[0].get(),
            ParamIndex::MidLowDrive => self.drive[1].get(),
            ParamIndex::MidHighDrive => self.drive[2].get(),
            ParamIndex::HighDrive => self.drive[3].get(),
            ParamIndex::Oversampling => self.oversampling().factor() as f32,
        }
    }

    /// Restore every default.
    pub fn reset(&self) {
        self.store(&ParamSnapshot::default());
    }

    /// Whether bypass is engaged.
    pub fn bypass(&self) -> bool {
        self.bypass.load(Ordering::Acquire)
    }

    /// Engage or release bypass.
    pub fn set_bypass(&self, bypass: bool) {
        self.bypass.store(bypass, Ordering::Release);
    }

    /// Set the input gain in dB.
    pub fn set_input_gain_db(&self, db: f32) {
        self.input_gain.set_db(db);
    }

    /// Set the output gain in dB.
    pub fn set_output_gain_db(&self, db: f32) {
        self.output_gain.set_db(db);
    }

    /// Set the dry gain in dB.
    pub fn set_dry_gain_db(&self, db: f32) {
        self.dry_gain.set_db(db);
    }

    /// Set the wet gain in dB.
    pub fn set_wet_gain_db(&self, db: f32) {
        self.wet_gain.set_db(db);
    }

    /// Drive of one band.
    pub fn drive(&self, role: BandRole) -> f32 {
        self.drive[role.index()].get()
    }

    /// Set the drive of one band, clamped to \[0, 1\].
    pub fn set_drive(&self, role: BandRole, drive: f32) {
        self.drive[role.index()].set(drive);
    }

    /// Current oversampling factor.
    ///
    /// An unexpected stored factor falls back to no oversampling.
    pub fn oversampling(&self) -> OversamplingRatio {
        let factor = self.oversampling.load(Ordering::Acquire);
        OversamplingRatio::from_factor(u32::from(factor)).unwrap_or(OversamplingRatio::X1)
    }

    /// Select the oversampling factor.
    pub fn set_oversampling(&self, ratio: OversamplingRatio) {
        self.oversampling.store(ratio.factor() as u8, Ordering::Release);
    }
}

impl Default for QuadrafuzzParams {
    fn default() -> Self {
        Self::new()
    }
}
