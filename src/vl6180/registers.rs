//! VL6180 register map

/// Public registers of the VL6180
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    IdentificationModelId = 0x000,
    IdentificationModelRevMajor = 0x001,
    IdentificationModelRevMinor = 0x002,
    IdentificationModuleRevMajor = 0x003,
    IdentificationModuleRevMinor = 0x004,
    IdentificationDateHi = 0x006,
    IdentificationDateLo = 0x007,
    /// 16-bit
    IdentificationTime = 0x008,
    SystemModeGpio1 = 0x011,
    SystemInterruptConfigGpio = 0x014,
    SystemInterruptClear = 0x015,
    SystemFreshOutOfReset = 0x016,
    SysrangeStart = 0x018,
    SysrangeIntermeasurementPeriod = 0x01B,
    SysrangeMaxConvergenceTime = 0x01C,
    /// 16-bit
    SysrangeCrosstalkCompensationRate = 0x01E,
    SysrangeCrosstalkValidHeight = 0x021,
    /// 16-bit
    SysrangeEarlyConvergenceEstimate = 0x022,
    SysrangeVhvRecalibrate = 0x02E,
    SysrangeVhvRepeatRate = 0x031,
    SysalsStart = 0x038,
    SysalsIntermeasurementPeriod = 0x03E,
    SysalsAnalogueGain = 0x03F,
    /// 16-bit
    SysalsIntegrationPeriod = 0x040,
    ResultRangeStatus = 0x04D,
    ResultInterruptStatusGpio = 0x04F,
    /// 16-bit
    ResultAlsVal = 0x050,
    ResultRangeVal = 0x062,
    ReadoutAveragingSamplePeriod = 0x10A,
}

impl Register {
    pub fn addr(self) -> u16 {
        self as u16
    }
}

/// Expected content of `IdentificationModelId`
pub const MODEL_ID: u8 = 0xB4;

/// Private register settings from ST application note AN4545, loaded once
/// after power up.
pub(crate) const PRIVATE_TUNING: [(u16, u8); 30] = [
    (0x0207, 0x01),
    (0x0208, 0x01),
    (0x0096, 0x00),
    (0x0097, 0xFD),
    (0x00E3, 0x00),
    (0x00E4, 0x04),
    (0x00E5, 0x02),
    (0x00E6, 0x01),
    (0x00E7, 0x03),
    (0x00F5, 0x02),
    (0x00D9, 0x05),
    (0x00DB, 0xCE),
    (0x00DC, 0x03),
    (0x00DD, 0xF8),
    (0x009F, 0x00),
    (0x00A3, 0x3C),
    (0x00B7, 0x00),
    (0x00BB, 0x3C),
    (0x00B2, 0x09),
    (0x00CA, 0x09),
    (0x0198, 0x01),
    (0x01B0, 0x17),
    (0x01AD, 0x00),
    (0x00FF, 0x05),
    (0x0100, 0x05),
    (0x0199, 0x05),
    (0x01A6, 0x1B),
    (0x01AC, 0x3E),
    (0x01A7, 0x1F),
    (0x0030, 0x00),
];

/// VHV calibration every 255 range measurements
pub(crate) const VHV_REPEAT_RATE: u8 = 0xFF;
/// 100 ms ALS integration time
pub(crate) const ALS_INTEGRATION_PERIOD: u16 = 0x0063;

pub(crate) const START_SINGLE_SHOT: u8 = 0x01;
pub(crate) const START_CONTINUOUS: u8 = 0x03;
pub(crate) const STOP_RANGING: u8 = 0x00;
/// Toggles the ALS start/stop bit back off
pub(crate) const STOP_ALS: u8 = 0x01;

/// Clears range, ALS and error interrupts
pub(crate) const CLEAR_ALL_INTERRUPTS: u8 = 0x07;
/// New sample ready for both range and ALS
pub(crate) const INTERRUPT_CONFIG_NEW_SAMPLE: u8 = 0x24;
pub(crate) const GPIO1_INTERRUPT_OUTPUT: u8 = 0x10;

/// Bit of `ResultInterruptStatusGpio` set when a range sample is ready
pub(crate) const RANGE_READY_BIT: usize = 2;
/// Bit of `ResultInterruptStatusGpio` set when an ALS sample is ready
pub(crate) const ALS_READY_BIT: usize = 5;
