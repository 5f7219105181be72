use num_enum::{IntoPrimitive, TryFromPrimitive};

// Default waits, sized for an 8-bit ADC clocked from a 1 MHz oscillator.
pub const SETTLE_US: u32 = 100; // ADC settling after channel selection
pub const PACING_MS: u32 = 1; // wait before every sample read
pub const STROBE_HOLD_MS: u32 = 10; // strobe low time after each port write

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum FilterMode {
    MovingAverage = 0,
    Median = 1,
}

impl Default for FilterMode {
    fn default() -> Self {
        FilterMode::MovingAverage
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub settle_us: u32,
    pub pacing_ms: u32,
    pub strobe_hold_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self{settle_us: SETTLE_US, pacing_ms: PACING_MS, strobe_hold_ms: STROBE_HOLD_MS}
    }
}

impl Timing {
    /// All waits disabled, for simulation and host tests.
    pub const fn immediate() -> Self {
        Self{settle_us: 0, pacing_ms: 0, strobe_hold_ms: 0}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineConfig {
    pub mode: FilterMode,
    pub timing: Timing,
}

impl PipelineConfig {
    pub fn new(mode: FilterMode) -> Self {
        Self{mode, timing: Timing::default()}
    }

    pub fn set_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn set_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Selects the mode from a raw byte, `0` moving average, `1` median.
    pub fn set_mode_byte(self, raw: u8) -> Option<Self> {
        FilterMode::try_from(raw).ok().map(|mode| self.set_mode(mode))
    }
}
