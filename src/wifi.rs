//! Platform Wi-Fi station and timer services used by
//! [`Connection`](crate::connection::Connection)

use heapless::String;

/// Events reported by the Wi-Fi station
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WifiMessage {
    /// Associated with the access point
    Connected,
    /// DHCP lease acquired
    GotIp,
    /// DHCP lease lost while still associated
    LostIp,
    Disconnected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    pub ssid: String<32>,
    /// WPA2 passphrase, empty for open networks
    pub password: String<64>,
    /// Join a specific access point
    pub bssid: Option<[u8; 6]>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanOptions {
    /// Include networks that hide their SSID
    pub hidden: bool,
    /// Only scan this channel
    pub channel: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Authentication {
    None,
    Wep,
    WpaPsk,
    Wpa2Psk,
    WpaWpa2Psk,
    Wpa2Enterprise,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub ssid: String<32>,
    pub bssid: [u8; 6],
    pub rssi: i8,
    pub channel: u8,
    pub authentication: Authentication,
    pub hidden: bool,
}

/// Wi-Fi station of the platform
pub trait WifiStation {
    type Error;

    fn connect(&mut self, options: &ConnectOptions) -> Result<(), Self::Error>;
    /// Drop the association and stop the station's own retries
    fn disconnect(&mut self) -> Result<(), Self::Error>;
    fn close(&mut self) -> Result<(), Self::Error>;
    /// Report every access point found to `callback`, then `None` once the
    /// scan is complete.
    fn scan<F>(&mut self, options: &ScanOptions, callback: F) -> Result<(), Self::Error>
    where
        F: FnMut(Option<&AccessPoint>);
}

/// One-shot millisecond timers. Expiry is delivered back to the owner of the
/// handle by the platform event loop.
pub trait Timer {
    type Handle: Copy + PartialEq;

    fn set(&mut self, delay_ms: u32) -> Self::Handle;
    fn clear(&mut self, handle: Self::Handle);
}
