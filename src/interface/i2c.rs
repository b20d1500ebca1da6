use crate::interface::RegisterInterface;

pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, CommE> I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write<Error = CommE> + hal::blocking::i2c::WriteRead<Error = CommE>,
{
    /// Create new I2C interface for the device at the 7-bit `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back, closing the interface
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, CommE> RegisterInterface for I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write<Error = CommE> + hal::blocking::i2c::WriteRead<Error = CommE>,
{
    type Error = CommE;

    fn write_u8(&mut self, address: u16, value: u8) -> Result<(), Self::Error> {
        let [hi, lo] = address.to_be_bytes();
        self.i2c.write(self.address, &[hi, lo, value])
    }

    fn write_u16(&mut self, address: u16, value: u16) -> Result<(), Self::Error> {
        // Address and payload both high byte first
        let [hi, lo] = address.to_be_bytes();
        let [value_hi, value_lo] = value.to_be_bytes();
        self.i2c.write(self.address, &[hi, lo, value_hi, value_lo])
    }

    fn read_register(&mut self, address: u16, buf: &mut [u8]) -> Result<(), Self::Error> {
        // Repeated start keeps the bus between the address and data phases
        self.i2c.write_read(self.address, &address.to_be_bytes(), buf)
    }
}
