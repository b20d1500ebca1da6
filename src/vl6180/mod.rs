//! Driver for the ST VL6180 proximity and ambient light sensor
//!
//! The driver talks to the chip through a [`RegisterInterface`], normally an
//! [`I2cInterface`] at address `0x29`. Construction checks the model ID,
//! loads the tuning settings from AN4545 and applies the default
//! [`Configuration`]. Sampling is done by polling the interrupt status
//! register; each wait is bounded by [`Options::max_polls`].

use bit_field::BitField;
use log::{debug, info, warn};

use crate::interface::{I2cInterface, RegisterInterface};
use crate::Error;

pub mod config;
pub mod registers;

pub use self::config::{
    AnalogueGain, ConfigField, Configuration, ConfigurationUpdate, Options, DEFAULT_ADDRESS,
    DEFAULT_BUS_FREQUENCY_HZ, DEFAULT_MAX_POLLS,
};
pub use self::registers::{Register, MODEL_ID};

use self::config::period_register;
use self::registers::*;

/// Lux per ALS count at the default integration period and unity gain
pub const LUX_PER_COUNT: f32 = 0.31683;
/// Largest distance the sensor reports, in centimeters
pub const MAX_DISTANCE_CM: f32 = 25.4;
/// Raw range values above this mean nothing was in range
const MAX_RAW_RANGE: u8 = 254;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Proximity {
    /// Centimeters
    pub distance: f32,
    /// An object was detected within range
    pub near: bool,
    /// Centimeters
    pub max: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lightmeter {
    /// Lux
    pub illuminance: f32,
}

/// One ranging and one ambient light measurement
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub proximity: Proximity,
    pub lightmeter: Lightmeter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Revision {
    pub major: u8,
    pub minor: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identification {
    pub model: u8,
    pub model_revision: Revision,
    pub module_revision: Revision,
    /// Manufacturing date and time, `date_hi << 24 | date_lo << 16 | time`
    pub unique_id: u32,
}

pub struct Vl6180<SI> {
    iface: SI,
    config: Configuration,
    max_polls: u32,
}

impl<I2C, CommE> Vl6180<I2cInterface<I2C>>
where
    I2C: hal::blocking::i2c::Write<Error = CommE> + hal::blocking::i2c::WriteRead<Error = CommE>,
{
    /// Open the sensor on `i2c` and bring it into the default configuration.
    pub fn new(i2c: I2C, options: Options) -> Result<Self, Error<CommE>> {
        Self::with_error_handler(i2c, options, |_| {})
    }

    /// Like [`Vl6180::new`], reporting a failed construction to `on_error`
    /// before the bus is released.
    ///
    /// A failed construction consumes `i2c`: the bus is dropped, not handed
    /// back. On a bus shared with other devices pass a proxy handle.
    pub fn with_error_handler<F>(i2c: I2C, options: Options, on_error: F) -> Result<Self, Error<CommE>>
    where
        F: FnOnce(&Error<CommE>),
    {
        Self::from_interface(I2cInterface::new(i2c, options.address), options, on_error)
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.iface.release()
    }
}

impl<SI> Vl6180<SI>
where
    SI: RegisterInterface,
{
    /// Bring up the sensor behind an already opened interface.
    ///
    /// On failure `on_error` sees the error, the interface is dropped and
    /// the error is returned. The interface is not recoverable from the
    /// error; only a successfully built driver gives its bus back through
    /// `release`. A wrong model ID stops before any register is
    /// written.
    pub fn from_interface<F>(iface: SI, options: Options, on_error: F) -> Result<Self, Error<SI::Error>>
    where
        F: FnOnce(&Error<SI::Error>),
    {
        let mut sensor = Self {
            iface,
            config: Configuration::default(),
            max_polls: options.max_polls,
        };

        match sensor.init() {
            Ok(()) => Ok(sensor),
            Err(e) => {
                on_error(&e);
                Err(e)
            }
        }
    }

    fn init(&mut self) -> Result<(), Error<SI::Error>> {
        let model = self.read_u8(Register::IdentificationModelId)?;
        if model != MODEL_ID {
            warn!("vl6180: unexpected model id {:#04x}", model);
            return Err(Error::InvalidModelId(model));
        }

        for &(address, value) in PRIVATE_TUNING.iter() {
            self.iface.write_u8(address, value).map_err(Error::Comm)?;
        }
        self.write_u8(Register::SysrangeVhvRepeatRate, VHV_REPEAT_RATE)?;
        self.write_u16(Register::SysalsIntegrationPeriod, ALS_INTEGRATION_PERIOD)?;
        self.write_u8(Register::SysrangeVhvRecalibrate, 0x01)?;
        self.write_u8(Register::SystemFreshOutOfReset, 0x00)?;

        let defaults = self.config;
        self.configure(&defaults.into())?;
        info!("vl6180: initialized");
        Ok(())
    }

    /// Apply the fields present in `update`, in declaration order.
    ///
    /// Each field is written to the chip before it is cached. The first
    /// invalid field aborts the call; fields before it stay applied.
    pub fn configure(&mut self, update: &ConfigurationUpdate) -> Result<(), Error<SI::Error>> {
        if let Some(mode) = update.ranging_mode {
            if mode > 1 {
                return Err(Error::InvalidConfig(ConfigField::RangingMode));
            }
            match (self.config.ranging_mode, mode) {
                (0, 1) => self.write_u8(Register::SysrangeStart, START_CONTINUOUS)?,
                (1, 0) => self.write_u8(Register::SysrangeStart, STOP_RANGING)?,
                _ => {}
            }
            self.config.ranging_mode = mode;
        }

        if let Some(frequency) = update.ranging_frequency {
            // the register holds at most 254 steps of 10 ms
            if frequency < 10 || frequency > 2540 {
                return Err(Error::InvalidConfig(ConfigField::RangingFrequency));
            }
            let (steps, rounded) = period_register(frequency);
            self.write_u8(Register::SysrangeIntermeasurementPeriod, steps)?;
            self.config.ranging_frequency = rounded;
        }

        if let Some(period) = update.averaging_sample_period {
            if period > 255 {
                return Err(Error::InvalidConfig(ConfigField::AveragingSamplePeriod));
            }
            self.write_u8(Register::ReadoutAveragingSamplePeriod, period as u8)?;
            self.config.averaging_sample_period = period as u8;
        }

        if let Some(time) = update.max_convergence_time {
            if time < 1 || time > 63 {
                return Err(Error::InvalidConfig(ConfigField::MaxConvergenceTime));
            }
            self.write_u8(Register::SysrangeMaxConvergenceTime, time as u8)?;
            self.config.max_convergence_time = time as u8;
        }

        if let Some(rate) = update.crosstalk_compensation_rate {
            self.write_u16(Register::SysrangeCrosstalkCompensationRate, rate)?;
            self.config.crosstalk_compensation_rate = rate;
        }

        if let Some(height) = update.crosstalk_valid_height {
            self.write_u8(Register::SysrangeCrosstalkValidHeight, height)?;
            self.config.crosstalk_valid_height = height;
        }

        if let Some(estimate) = update.early_convergence_estimate {
            self.write_u16(Register::SysrangeEarlyConvergenceEstimate, estimate)?;
            self.config.early_convergence_estimate = estimate;
        }

        if let Some(enable) = update.enable_sample_ready_polling {
            let mode = if enable { GPIO1_INTERRUPT_OUTPUT } else { 0x00 };
            self.write_u8(Register::SystemModeGpio1, mode)?;
            self.write_u8(Register::SystemInterruptConfigGpio, INTERRUPT_CONFIG_NEW_SAMPLE)?;
            self.config.enable_sample_ready_polling = enable;
        }

        if let Some(factor) = update.analogue_gain {
            let gain = AnalogueGain::from_factor(factor)
                .ok_or(Error::InvalidConfig(ConfigField::AnalogueGain))?;
            self.write_u8(Register::SysalsAnalogueGain, gain.register_value())?;
            self.config.analogue_gain = gain;
        }

        if let Some(mode) = update.als_mode {
            if mode > 1 {
                return Err(Error::InvalidConfig(ConfigField::AlsMode));
            }
            match (self.config.als_mode, mode) {
                (0, 1) => self.write_u8(Register::SysalsStart, START_CONTINUOUS)?,
                (1, 0) => self.write_u8(Register::SysalsStart, STOP_ALS)?,
                _ => {}
            }
            self.config.als_mode = mode;
        }

        if let Some(frequency) = update.als_frequency {
            if frequency < 10 || frequency > 2550 {
                return Err(Error::InvalidConfig(ConfigField::AlsFrequency));
            }
            let (steps, rounded) = period_register(frequency);
            self.write_u8(Register::SysalsIntermeasurementPeriod, steps)?;
            self.config.als_frequency = rounded;
        }

        debug!("vl6180: configuration {:?}", self.config);
        Ok(())
    }

    pub fn configuration(&self) -> Configuration {
        self.config
    }

    /// Read the identification block from the chip
    pub fn identification(&mut self) -> Result<Identification, Error<SI::Error>> {
        let model = self.read_u8(Register::IdentificationModelId)?;
        let model_revision = Revision {
            major: self.read_u8(Register::IdentificationModelRevMajor)?.get_bits(0..3),
            minor: self.read_u8(Register::IdentificationModelRevMinor)?.get_bits(0..3),
        };
        let module_revision = Revision {
            major: self.read_u8(Register::IdentificationModuleRevMajor)?.get_bits(0..3),
            minor: self.read_u8(Register::IdentificationModuleRevMinor)?.get_bits(0..3),
        };
        let date_hi = self.read_u8(Register::IdentificationDateHi)?;
        let date_lo = self.read_u8(Register::IdentificationDateLo)?;
        let time = self.iface.read_u16(Register::IdentificationTime.addr()).map_err(Error::Comm)?;

        Ok(Identification {
            model,
            model_revision,
            module_revision,
            unique_id: u32::from(date_hi) << 24 | u32::from(date_lo) << 16 | u32::from(time),
        })
    }

    /// Error code of the last range measurement, bits 7:4 of
    /// `ResultRangeStatus`. Zero means no error.
    pub fn range_status(&mut self) -> Result<u8, Error<SI::Error>> {
        Ok(self.read_u8(Register::ResultRangeStatus)?.get_bits(4..8))
    }

    /// Take one range and one ambient light measurement.
    pub fn sample(&mut self) -> Result<Sample, Error<SI::Error>> {
        if self.config.ranging_mode == 0 {
            self.write_u8(Register::SysrangeStart, START_SINGLE_SHOT)?;
        }
        self.wait_for(RANGE_READY_BIT)?;
        self.write_u8(Register::SystemInterruptClear, CLEAR_ALL_INTERRUPTS)?;
        let range = self.read_u8(Register::ResultRangeVal)?;

        if self.config.als_mode == 0 {
            self.write_u8(Register::SysalsStart, START_SINGLE_SHOT)?;
        }
        self.wait_for(ALS_READY_BIT)?;
        let als = self.iface.read_u16(Register::ResultAlsVal.addr()).map_err(Error::Comm)?;
        self.write_u8(Register::SystemInterruptClear, CLEAR_ALL_INTERRUPTS)?;

        Ok(Sample {
            proximity: Proximity {
                distance: f32::from(range) / 10.0,
                near: range <= MAX_RAW_RANGE,
                max: MAX_DISTANCE_CM,
            },
            lightmeter: Lightmeter {
                illuminance: f32::from(als) * LUX_PER_COUNT,
            },
        })
    }

    fn wait_for(&mut self, bit: usize) -> Result<(), Error<SI::Error>> {
        for _ in 0..self.max_polls {
            let status = self.read_u8(Register::ResultInterruptStatusGpio)?;
            if status.get_bit(bit) {
                return Ok(());
            }
        }
        warn!("vl6180: no sample after {} polls", self.max_polls);
        Err(Error::Timeout)
    }

    fn read_u8(&mut self, register: Register) -> Result<u8, Error<SI::Error>> {
        self.iface.read_u8(register.addr()).map_err(Error::Comm)
    }

    fn write_u8(&mut self, register: Register, value: u8) -> Result<(), Error<SI::Error>> {
        self.iface.write_u8(register.addr(), value).map_err(Error::Comm)
    }

    fn write_u16(&mut self, register: Register, value: u16) -> Result<(), Error<SI::Error>> {
        self.iface.write_u16(register.addr(), value).map_err(Error::Comm)
    }
}
