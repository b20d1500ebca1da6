//! Sensor configuration records

/// Default 7-bit I2C address of the VL6180
pub const DEFAULT_ADDRESS: u8 = 0x29;
/// Bus clock the VL6180 is specified for. The HAL building the bus owns the
/// actual clock setup.
pub const DEFAULT_BUS_FREQUENCY_HZ: u32 = 400_000;
/// Status reads per sample phase before giving up
pub const DEFAULT_MAX_POLLS: u32 = 10_000;

/// Construction options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Options {
    /// 7-bit bus address
    pub address: u8,
    /// Upper bound of status register reads while waiting for one sample
    pub max_polls: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }
}

/// ALS analogue gain settings. The discriminant is the datasheet gain code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogueGain {
    X20 = 0,
    X10 = 1,
    X5 = 2,
    X2_5 = 3,
    X1_67 = 4,
    X1_25 = 5,
    X1 = 6,
    X40 = 7,
}

const GAINS: [(f32, AnalogueGain); 8] = [
    (40.0, AnalogueGain::X40),
    (20.0, AnalogueGain::X20),
    (10.0, AnalogueGain::X10),
    (5.0, AnalogueGain::X5),
    (2.5, AnalogueGain::X2_5),
    (1.67, AnalogueGain::X1_67),
    (1.25, AnalogueGain::X1_25),
    (1.0, AnalogueGain::X1),
];

impl AnalogueGain {
    /// Look up the setting for a nominal gain factor. Only the eight
    /// factors listed in the datasheet are accepted.
    pub fn from_factor(factor: f32) -> Option<Self> {
        GAINS
            .iter()
            .find(|(nominal, _)| *nominal == factor)
            .map(|(_, gain)| *gain)
    }

    pub fn factor(self) -> f32 {
        GAINS
            .iter()
            .find(|(_, gain)| *gain == self)
            .map(|(nominal, _)| *nominal)
            .unwrap_or(1.0)
    }

    /// Value for `SysalsAnalogueGain`; the upper nibble must read 0x4.
    pub fn register_value(self) -> u8 {
        0x40 | self as u8
    }
}

/// Names the configuration field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigField {
    RangingMode,
    RangingFrequency,
    AveragingSamplePeriod,
    MaxConvergenceTime,
    CrosstalkCompensationRate,
    CrosstalkValidHeight,
    EarlyConvergenceEstimate,
    EnableSampleReadyPolling,
    AnalogueGain,
    AlsMode,
    AlsFrequency,
}

/// Live configuration of the sensor, equal to what was last written to it
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// 0 single shot, 1 continuous
    pub ranging_mode: u8,
    /// Milliseconds between continuous range measurements
    pub ranging_frequency: u16,
    /// Milliseconds between continuous ALS measurements
    pub als_frequency: u16,
    pub averaging_sample_period: u8,
    /// Milliseconds
    pub max_convergence_time: u8,
    pub crosstalk_compensation_rate: u16,
    pub crosstalk_valid_height: u8,
    pub early_convergence_estimate: u16,
    pub enable_sample_ready_polling: bool,
    pub analogue_gain: AnalogueGain,
    /// 0 single shot, 1 continuous
    pub als_mode: u8,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            ranging_mode: 0,
            ranging_frequency: 100,
            als_frequency: 500,
            averaging_sample_period: 48,
            max_convergence_time: 49,
            crosstalk_compensation_rate: 0,
            crosstalk_valid_height: 20,
            early_convergence_estimate: 0,
            enable_sample_ready_polling: true,
            analogue_gain: AnalogueGain::X1,
            als_mode: 0,
        }
    }
}

/// A partial configuration change. Absent fields are left untouched.
///
/// Numeric fields are wider than their registers so that out-of-range
/// requests are reported instead of truncated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationUpdate {
    pub ranging_mode: Option<u8>,
    pub ranging_frequency: Option<u32>,
    pub averaging_sample_period: Option<u32>,
    pub max_convergence_time: Option<u32>,
    pub crosstalk_compensation_rate: Option<u16>,
    pub crosstalk_valid_height: Option<u8>,
    pub early_convergence_estimate: Option<u16>,
    pub enable_sample_ready_polling: Option<bool>,
    pub analogue_gain: Option<f32>,
    pub als_mode: Option<u8>,
    pub als_frequency: Option<u32>,
}

impl From<Configuration> for ConfigurationUpdate {
    fn from(config: Configuration) -> Self {
        Self {
            ranging_mode: Some(config.ranging_mode),
            ranging_frequency: Some(config.ranging_frequency.into()),
            averaging_sample_period: Some(config.averaging_sample_period.into()),
            max_convergence_time: Some(config.max_convergence_time.into()),
            crosstalk_compensation_rate: Some(config.crosstalk_compensation_rate),
            crosstalk_valid_height: Some(config.crosstalk_valid_height),
            early_convergence_estimate: Some(config.early_convergence_estimate),
            enable_sample_ready_polling: Some(config.enable_sample_ready_polling),
            analogue_gain: Some(config.analogue_gain.factor()),
            als_mode: Some(config.als_mode),
            als_frequency: Some(config.als_frequency.into()),
        }
    }
}

/// Round a period in milliseconds down to the 10 ms register resolution.
/// Returns the register value and the rounded period.
pub(crate) fn period_register(period_ms: u32) -> (u8, u16) {
    let steps = period_ms / 10;
    // callers have bounded the period to 2550 ms
    (steps as u8, (steps * 10) as u16)
}
