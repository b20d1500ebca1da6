//! Digital input that can wake the device from sleep

use log::debug;

use crate::Error;

/// The only value format supported by [`WakeableDigital`]
pub const FORMAT_NUMBER: &str = "number";

/// Pin level that triggers a wake up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeLevel {
    Low,
    High,
}

/// Platform sleep controller
pub trait SleepControl {
    type Error;
    /// Platform defined cause of the last wake up
    type Reason;

    fn enable_wakeup(&mut self, pin: u8, level: WakeLevel) -> Result<(), Self::Error>;
    fn disable_wakeup(&mut self, pin: u8) -> Result<(), Self::Error>;
    fn wakeup_reason(&self) -> Self::Reason;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeConfig {
    /// GPIO number as known to the sleep controller
    pub pin: u8,
    pub level: WakeLevel,
}

pub struct WakeableDigital<P, S> {
    pin: Option<P>,
    sleep: S,
    pin_number: u8,
}

impl<P, S, PinE> WakeableDigital<P, S>
where
    P: hal::digital::v2::InputPin<Error = PinE>,
    S: SleepControl,
{
    /// Claim `pin` and register it as a wake source
    pub fn new(pin: P, mut sleep: S, config: WakeConfig) -> Result<Self, Error<S::Error, PinE>> {
        sleep
            .enable_wakeup(config.pin, config.level)
            .map_err(Error::Comm)?;
        debug!("wake source on pin {} ({:?})", config.pin, config.level);

        Ok(Self {
            pin: Some(pin),
            sleep,
            pin_number: config.pin,
        })
    }

    /// Release the wake source. Calling it again does nothing.
    pub fn close(&mut self) -> Result<(), Error<S::Error, PinE>> {
        if self.pin.is_none() {
            return Ok(());
        }
        self.sleep
            .disable_wakeup(self.pin_number)
            .map_err(Error::Comm)?;
        self.pin = None;
        Ok(())
    }

    /// Current pin level, 0 or 1
    pub fn read(&self) -> Result<u8, Error<S::Error, PinE>> {
        let pin = self.pin.as_ref().ok_or(Error::Closed)?;
        let high = pin.is_high().map_err(Error::Pin)?;
        Ok(high as u8)
    }

    pub fn wakeup_reason(&self) -> S::Reason {
        self.sleep.wakeup_reason()
    }

    pub fn pin_number(&self) -> u8 {
        self.pin_number
    }

    /// Always `"number"`
    pub fn format(&self) -> &'static str {
        FORMAT_NUMBER
    }

    pub fn set_format(&mut self, format: &str) -> Result<(), Error<S::Error, PinE>> {
        if format == FORMAT_NUMBER {
            Ok(())
        } else {
            Err(Error::InvalidFormat)
        }
    }
}
