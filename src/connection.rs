//! Wi-Fi connection that reconnects by itself
//!
//! [`Connection`] owns a [`WifiStation`] and forwards its events to a
//! callback. When the link drops it schedules a reconnect after
//! [`RECONNECT_DELAY_MS`], since stations tend to report spurious
//! disconnects right before a successful association. Repeated disconnect
//! events are reported only once.

use log::{debug, info};

use crate::wifi::{AccessPoint, ConnectOptions, ScanOptions, Timer, WifiMessage, WifiStation};

/// Delay before a dropped connection is retried
pub const RECONNECT_DELAY_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    Disconnected,
    Connected,
    GotIp,
}

pub struct Connection<W, T, F>
where
    T: Timer,
{
    wifi: W,
    timer: T,
    options: ConnectOptions,
    callback: F,
    state: ConnectionState,
    reconnect: Option<T::Handle>,
}

impl<W, T, F> Connection<W, T, F>
where
    W: WifiStation,
    T: Timer,
    F: FnMut(WifiMessage, Option<i32>),
{
    /// Start connecting `wifi` with `options`. Events reach `callback`
    /// through [`Connection::handle_event`].
    pub fn new(mut wifi: W, timer: T, options: ConnectOptions, callback: F) -> Result<Self, W::Error> {
        wifi.connect(&options)?;
        info!("wifi: connecting to {}", options.ssid.as_str());

        Ok(Self {
            wifi,
            timer,
            options,
            callback,
            state: ConnectionState::Disconnected,
            reconnect: None,
        })
    }

    /// Feed one event from the station
    pub fn handle_event(&mut self, message: WifiMessage, code: Option<i32>) {
        match message {
            WifiMessage::Disconnected => {
                if self.reconnect.is_none() {
                    debug!("wifi: reconnect in {} ms", RECONNECT_DELAY_MS);
                    self.reconnect = Some(self.timer.set(RECONNECT_DELAY_MS));
                }
                if self.state == ConnectionState::Disconnected {
                    return;
                }
                self.state = ConnectionState::Disconnected;
            }
            WifiMessage::Connected => {
                self.cancel_reconnect();
                self.state = ConnectionState::Connected;
            }
            WifiMessage::GotIp => self.state = ConnectionState::GotIp,
            WifiMessage::LostIp => {
                if self.state == ConnectionState::GotIp {
                    self.state = ConnectionState::Connected;
                }
            }
        }
        (self.callback)(message, code);
    }

    /// Feed a timer expiry. Handles other than the pending reconnect are
    /// ignored.
    pub fn on_timer(&mut self, handle: T::Handle) -> Result<(), W::Error> {
        if self.reconnect != Some(handle) {
            return Ok(());
        }
        self.reconnect = None;
        info!("wifi: reconnecting to {}", self.options.ssid.as_str());
        self.wifi.connect(&self.options)
    }

    /// An IP address has been acquired
    pub fn ready(&self) -> bool {
        self.state == ConnectionState::GotIp
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn scan<C>(&mut self, options: &ScanOptions, callback: C) -> Result<(), W::Error>
    where
        C: FnMut(Option<&AccessPoint>),
    {
        self.wifi.scan(options, callback)
    }

    /// Stop reconnecting, disconnect and close the station
    pub fn close(mut self) -> Result<(), W::Error> {
        self.cancel_reconnect();
        self.wifi.disconnect()?;
        self.wifi.close()
    }

    fn cancel_reconnect(&mut self) {
        if let Some(handle) = self.reconnect.take() {
            self.timer.clear(handle);
        }
    }
}
