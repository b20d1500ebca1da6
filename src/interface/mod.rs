pub mod i2c;

pub use self::i2c::I2cInterface;

/// Register level access to a device with 16-bit register addresses.
///
/// Every call is one complete bus transaction: the address phase and the
/// payload phase can never be split across calls. Writes are fixed width so
/// a payload is always sent whole.
pub trait RegisterInterface {
    type Error;

    fn write_u8(&mut self, address: u16, value: u8) -> Result<(), Self::Error>;

    /// Words go out on the wire big-endian.
    fn write_u16(&mut self, address: u16, value: u16) -> Result<(), Self::Error>;

    /// Fill `buf` from register `address` onwards.
    fn read_register(&mut self, address: u16, buf: &mut [u8]) -> Result<(), Self::Error>;

    fn read_u8(&mut self, address: u16) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_register(address, &mut buf)?;
        Ok(buf[0])
    }

    /// Words are read back in the little-endian layout of the target host.
    fn read_u16(&mut self, address: u16) -> Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.read_register(address, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }
}
